//! Machine implementation

use crate::error::VmError;
use crate::io::{Input, Output};
use crate::memory::Memory;
use crate::opcode::{decode, Instruction, OpCode};
use tracing::{debug, trace};

// Module structure
mod execution;
mod operands;
mod result;

// Internal imports
use result::ExecutionResult;

/// Observable machine state after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More instructions to execute
    Running,
    /// HALT reached; further steps are no-ops
    Halted,
}

/// Intcode machine
///
/// Owns a private copy of its program and the two channels it talks
/// through. Nothing else is shared with the outside world.
pub struct Machine<I, O> {
    /// Program memory, both tiers
    pub(crate) memory: Memory,

    /// Instruction pointer
    pub(crate) position: i64,

    /// Base for relative-mode parameters
    pub(crate) relative_base: i64,

    /// Set once HALT has executed
    halted: bool,

    /// Source for INPUT
    pub(crate) input: I,

    /// Sink for OUTPUT
    pub(crate) output: O,
}

impl<I: Input, O: Output> Machine<I, O> {
    /// Create a machine from a snapshot of `program`
    pub fn new(program: &[i64], input: I, output: O) -> Self {
        Self {
            memory: Memory::new(program),
            position: 0,
            relative_base: 0,
            halted: false,
            input,
            output,
        }
    }

    /// Run until HALT and return the final program-sized memory
    pub fn run(&mut self) -> Result<Vec<i64>, VmError> {
        debug!(cells = self.memory.len(), "machine starting");
        while self.step()? == Status::Running {}
        debug!(
            position = self.position,
            extended = self.memory.extended_len(),
            "machine halted"
        );
        Ok(self.memory.as_slice().to_vec())
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<Status, VmError> {
        if self.halted {
            return Ok(Status::Halted);
        }

        // Fetch and decode
        let word = self.memory.read(self.position);
        let instruction = decode(word);
        let opcode = OpCode::from_i64(instruction.opcode()).ok_or(VmError::UnknownOpcode {
            value: word,
            position: self.position,
        })?;

        trace!(position = self.position, word, %opcode, "dispatch");

        match self.execute_instruction(opcode, instruction)? {
            ExecutionResult::Advance => {
                self.position = self.position.checked_add(opcode.width()).ok_or(
                    VmError::Overflow {
                        position: self.position,
                    },
                )?;
                Ok(Status::Running)
            }
            ExecutionResult::Jump(target) => {
                self.position = target;
                Ok(Status::Running)
            }
            ExecutionResult::Halt => {
                self.halted = true;
                Ok(Status::Halted)
            }
        }
    }

    /// Execute a single decoded instruction
    fn execute_instruction(
        &mut self,
        opcode: OpCode,
        instruction: Instruction,
    ) -> Result<ExecutionResult, VmError> {
        match opcode {
            // Arithmetic operations
            OpCode::Add | OpCode::Mul => self.execute_arithmetic(opcode, instruction),

            // Comparison operations
            OpCode::LessThan | OpCode::Equals => self.execute_comparison(opcode, instruction),

            // Control flow
            OpCode::JumpIfTrue
            | OpCode::JumpIfFalse
            | OpCode::AdjustRelativeBase
            | OpCode::Halt => self.execute_control(opcode, instruction),

            // Channels
            OpCode::Input | OpCode::Output => self.execute_io(opcode, instruction),
        }
    }
}

impl<I, O> Machine<I, O> {
    /// Current instruction pointer
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Current relative base
    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Whether HALT has executed
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Read-only view of memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Give back the input source and output sink
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}
