//! Execution result types

/// Result of instruction execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecutionResult {
    /// Move past the instruction
    Advance,
    /// Continue at an absolute position
    Jump(i64),
    /// Stop the machine
    Halt,
}
