//! Fatal machine errors

use crate::channel::link;
use crate::io::Console;
use crate::{collect_output, execute, Machine, VmError};
use std::collections::VecDeque;
use std::io::Cursor;

#[test]
fn test_unknown_opcode() {
    let err = execute(&[1, 0, 0, 0, 42]).unwrap_err();
    assert_eq!(
        err,
        VmError::UnknownOpcode {
            value: 42,
            position: 4
        }
    );
}

#[test]
fn test_jump_into_empty_memory() {
    let err = execute(&[1105, 1, 100]).unwrap_err();
    assert_eq!(
        err,
        VmError::UnknownOpcode {
            value: 0,
            position: 100
        }
    );
}

#[test]
fn test_unknown_mode() {
    let err = execute(&[301, 0, 0, 0, 99]).unwrap_err();
    assert_eq!(err, VmError::UnknownMode { value: 3, position: 0 });
}

#[test]
fn test_input_exhausted() {
    let err = collect_output(&[3, 0, 3, 0, 99], [1]).unwrap_err();
    assert_eq!(err, VmError::InputExhausted { position: 2 });
}

#[test]
fn test_invalid_console_input() {
    let console = Console::new(Cursor::new("x\n"), Vec::new());
    let mut machine = Machine::new(&[3, 0, 99], console, Vec::new());
    let err = machine.run().unwrap_err();
    assert_eq!(
        err,
        VmError::InvalidInput {
            position: 0,
            text: "x".to_string()
        }
    );
}

#[test]
fn test_output_closed() {
    let (tx, rx) = link(None);
    drop(rx);
    let mut machine = Machine::new(&[104, 1, 99], VecDeque::new(), tx);
    let err = machine.run().unwrap_err();
    assert_eq!(err, VmError::OutputClosed { position: 0 });
}

#[test]
fn test_overflow() {
    let err = execute(&[1102, i64::MAX, 2, 0, 99]).unwrap_err();
    assert_eq!(err, VmError::Overflow { position: 0 });
}

#[test]
fn test_parameter_past_last_address() {
    // Writes OUT at the last address and jumps to it
    let err = execute(&[1101, 104, 0, i64::MAX, 1105, 1, i64::MAX]).unwrap_err();
    assert_eq!(
        err,
        VmError::Overflow {
            position: i64::MAX
        }
    );
}

#[test]
fn test_advance_past_last_address() {
    let at = i64::MAX - 1;
    // OUT #7 placed so that its single parameter is the last cell
    let program = [1101, 104, 0, at, 1101, 7, 0, i64::MAX, 1105, 1, at];
    let mut machine = Machine::new(&program, VecDeque::new(), Vec::new());
    let err = machine.run().unwrap_err();

    assert_eq!(err, VmError::Overflow { position: at });
    assert_eq!(machine.output(), &vec![7]);
    assert_eq!(machine.position(), at);
}

#[test]
fn test_error_leaves_machine_stopped_in_place() {
    let mut machine = Machine::new(&[1101, 1, 1, 0, 3, 0, 99], VecDeque::new(), Vec::new());
    let err = machine.run().unwrap_err();
    assert_eq!(err.position(), 4);
    assert_eq!(machine.position(), 4);
    assert!(!machine.is_halted());
    assert_eq!(machine.memory().read(0), 2);
}
