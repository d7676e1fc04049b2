//! Intcode Virtual Machine
//!
//! This crate implements the Intcode machine: a sequential-memory
//! interpreter for integer instruction words with position, immediate and
//! relative addressing, memory that grows past the loaded program, and
//! pluggable input/output channels.
//!
//! # Architecture
//!
//! - A [`Machine`] owns its memory, instruction pointer and relative base
//!   and runs a fetch-decode-execute loop until HALT.
//! - It talks to the world only through an [`Input`] and an [`Output`]
//!   supplied at construction; INPUT and OUTPUT are its only suspension
//!   points.
//! - Concurrency lives outside the machine: [`coordinator`] wires several
//!   machines together with [`channel`] links and runs each on its own
//!   blocking thread.
//!
//! # Modules
//!
//! - `opcode`: Instruction set and word decoding
//! - `memory`: Dense program cells plus sparse extension
//! - `vm`: Execution engine
//! - `io`: Input/output traits and simple implementations
//! - `channel`: FIFO links between machines
//! - `coordinator`: Chains, feedback rings and background sessions
//! - `disasm`: Program listings
//! - `program`: Program snapshot helpers
//! - `error`: Error types

use std::collections::VecDeque;

pub mod channel;
pub mod coordinator;
pub mod disasm;
pub mod error;
pub mod io;
pub mod memory;
pub mod opcode;
pub mod program;
pub mod vm;

// Re-export main types
pub use coordinator::{chain, spawn, CoordinatorError, LinkConfig, Ring, Session};
pub use disasm::{disassemble, format_listing};
pub use error::VmError;
pub use io::{Discard, Input, InputError, NoInput, Output, OutputError};
pub use memory::Memory;
pub use opcode::{decode, Instruction, Mode, OpCode};
pub use program::{patch, PatchError};
pub use vm::{Machine, Status};

/// Run a program without I/O and return its final memory
pub fn execute(program: &[i64]) -> Result<Vec<i64>, VmError> {
    Machine::new(program, NoInput, Discard).run()
}

/// Run a program on fixed inputs and return every output in order
pub fn collect_output(
    program: &[i64],
    inputs: impl IntoIterator<Item = i64>,
) -> Result<Vec<i64>, VmError> {
    let inputs: VecDeque<i64> = inputs.into_iter().collect();
    let mut machine = Machine::new(program, inputs, Vec::new());
    machine.run()?;
    let (_, outputs) = machine.into_parts();
    Ok(outputs)
}

#[cfg(test)]
mod tests;
