//! Control flow instruction execution

use crate::error::VmError;
use crate::opcode::{Instruction, OpCode};
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;
use tracing::trace;

impl<I, O> Machine<I, O> {
    /// Execute control flow instructions
    pub(crate) fn execute_control(
        &mut self,
        opcode: OpCode,
        instruction: Instruction,
    ) -> Result<ExecutionResult, VmError> {
        match opcode {
            OpCode::JumpIfTrue => {
                let cond = self.operand(instruction, 1)?;
                if cond != 0 {
                    let target = self.operand(instruction, 2)?;
                    return Ok(ExecutionResult::Jump(target));
                }
                Ok(ExecutionResult::Advance)
            }

            OpCode::JumpIfFalse => {
                let cond = self.operand(instruction, 1)?;
                if cond == 0 {
                    let target = self.operand(instruction, 2)?;
                    return Ok(ExecutionResult::Jump(target));
                }
                Ok(ExecutionResult::Advance)
            }

            OpCode::AdjustRelativeBase => {
                let offset = self.operand(instruction, 1)?;
                self.relative_base = self.relative_base.checked_add(offset).ok_or(
                    VmError::Overflow {
                        position: self.position,
                    },
                )?;
                trace!(relative_base = self.relative_base, "relative base adjusted");
                Ok(ExecutionResult::Advance)
            }

            OpCode::Halt => Ok(ExecutionResult::Halt),

            _ => unreachable!("Non-control opcode in control handler"),
        }
    }
}
