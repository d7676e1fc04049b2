//! Input/output instruction execution

use crate::error::VmError;
use crate::io::{Input, InputError, Output, OutputError};
use crate::opcode::{Instruction, OpCode};
use crate::vm::result::ExecutionResult;
use crate::vm::Machine;
use tracing::debug;

impl<I: Input, O: Output> Machine<I, O> {
    /// Execute channel instructions
    pub(crate) fn execute_io(
        &mut self,
        opcode: OpCode,
        instruction: Instruction,
    ) -> Result<ExecutionResult, VmError> {
        let position = self.position;

        match opcode {
            OpCode::Input => {
                // Resolve the target before consuming a value
                let address = self.parameter_address(instruction, 1)?;
                let value = self.input.read().map_err(|err| match err {
                    InputError::Exhausted => VmError::InputExhausted { position },
                    InputError::TimedOut(timeout) => VmError::InputTimeout { position, timeout },
                    InputError::Invalid(text) => VmError::InvalidInput { position, text },
                })?;
                debug!(position, address, value, "input");
                self.memory.write(address, value);
                Ok(ExecutionResult::Advance)
            }

            OpCode::Output => {
                let value = self.operand(instruction, 1)?;
                debug!(position, value, "output");
                self.output.write(value).map_err(|err| match err {
                    OutputError::Closed => VmError::OutputClosed { position },
                })?;
                Ok(ExecutionResult::Advance)
            }

            _ => unreachable!("Non-io opcode in io handler"),
        }
    }
}
