//! Arithmetic instruction execution

use crate::error::VmError;
use crate::opcode::{Instruction, OpCode};
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl<I, O> Machine<I, O> {
    /// Execute arithmetic instructions
    pub(crate) fn execute_arithmetic(
        &mut self,
        opcode: OpCode,
        instruction: Instruction,
    ) -> Result<ExecutionResult, VmError> {
        let left = self.operand(instruction, 1)?;
        let right = self.operand(instruction, 2)?;

        let result = match opcode {
            OpCode::Add => left.checked_add(right),
            OpCode::Mul => left.checked_mul(right),
            _ => unreachable!("Non-arithmetic opcode in arithmetic handler"),
        }
        .ok_or(VmError::Overflow {
            position: self.position,
        })?;

        self.store(instruction, 3, result)?;
        Ok(ExecutionResult::Advance)
    }
}
