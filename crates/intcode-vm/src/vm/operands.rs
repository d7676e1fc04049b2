//! Parameter resolution
//!
//! Every parameter resolves to an address first. Reads fetch the cell at
//! that address; writes store to it. Immediate mode resolves to the
//! parameter cell itself, so an immediate-mode write target overwrites
//! its own literal.

use crate::error::VmError;
use crate::opcode::{Instruction, Mode};
use crate::vm::Machine;

impl<I, O> Machine<I, O> {
    /// Address a 1-based parameter refers to
    pub(crate) fn parameter_address(
        &self,
        instruction: Instruction,
        index: usize,
    ) -> Result<i64, VmError> {
        let slot = self
            .position
            .checked_add(index as i64)
            .ok_or(VmError::Overflow {
                position: self.position,
            })?;
        let mode = instruction.mode(index).map_err(|digit| VmError::UnknownMode {
            value: digit,
            position: self.position,
        })?;

        match mode {
            Mode::Position => Ok(self.memory.read(slot)),
            Mode::Immediate => Ok(slot),
            Mode::Relative => self
                .relative_base
                .checked_add(self.memory.read(slot))
                .ok_or(VmError::Overflow {
                    position: self.position,
                }),
        }
    }

    /// Value of a 1-based read parameter
    #[inline]
    pub(crate) fn operand(&self, instruction: Instruction, index: usize) -> Result<i64, VmError> {
        let address = self.parameter_address(instruction, index)?;
        Ok(self.memory.read(address))
    }

    /// Store through a 1-based write parameter
    #[inline]
    pub(crate) fn store(
        &mut self,
        instruction: Instruction,
        index: usize,
        value: i64,
    ) -> Result<(), VmError> {
        let address = self.parameter_address(instruction, index)?;
        self.memory.write(address, value);
        Ok(())
    }
}
