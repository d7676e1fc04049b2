//! Instruction execution handlers

mod arithmetic;
mod comparison;
mod control;
mod io;
