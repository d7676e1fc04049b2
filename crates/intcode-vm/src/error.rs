//! Error types for the machine

use std::time::Duration;
use thiserror::Error;

/// Machine runtime errors
///
/// Every variant carries the instruction pointer at which execution stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Low two digits of the instruction word are not an opcode
    #[error("unknown opcode in instruction {value} at position {position}")]
    UnknownOpcode { value: i64, position: i64 },

    /// A parameter mode digit is not 0, 1 or 2
    #[error("unknown addressing mode {value} at position {position}")]
    UnknownMode { value: i64, position: i64 },

    /// Input source has no more values
    #[error("input exhausted at position {position}")]
    InputExhausted { position: i64 },

    /// Blocking input read gave up
    #[error("input timed out after {timeout:?} at position {position}")]
    InputTimeout { position: i64, timeout: Duration },

    /// Input source produced something that is not an integer
    #[error("invalid input '{text}' at position {position}")]
    InvalidInput { position: i64, text: String },

    /// Output sink no longer accepts values
    #[error("output closed at position {position}")]
    OutputClosed { position: i64 },

    /// Result does not fit in an i64
    #[error("arithmetic overflow at position {position}")]
    Overflow { position: i64 },
}

impl VmError {
    /// Instruction pointer of the failing instruction
    pub fn position(&self) -> i64 {
        match self {
            VmError::UnknownOpcode { position, .. }
            | VmError::UnknownMode { position, .. }
            | VmError::InputExhausted { position }
            | VmError::InputTimeout { position, .. }
            | VmError::InvalidInput { position, .. }
            | VmError::OutputClosed { position }
            | VmError::Overflow { position } => *position,
        }
    }

    /// Whether this error is a consequence of a neighbouring machine stopping
    ///
    /// In a chain or ring a failing machine closes its links, so its
    /// neighbours fail with exhausted input or a closed output.
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            VmError::InputExhausted { .. } | VmError::OutputClosed { .. }
        )
    }
}
