//! Comparison instruction execution

use crate::error::VmError;
use crate::opcode::{Instruction, OpCode};
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;

impl<I, O> Machine<I, O> {
    /// Execute comparison instructions
    pub(crate) fn execute_comparison(
        &mut self,
        opcode: OpCode,
        instruction: Instruction,
    ) -> Result<ExecutionResult, VmError> {
        let left = self.operand(instruction, 1)?;
        let right = self.operand(instruction, 2)?;

        let holds = match opcode {
            OpCode::LessThan => left < right,
            OpCode::Equals => left == right,
            _ => unreachable!("Non-comparison opcode in comparison handler"),
        };

        self.store(instruction, 3, holds as i64)?;
        Ok(ExecutionResult::Advance)
    }
}
