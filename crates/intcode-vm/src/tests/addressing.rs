//! Addressing modes and memory growth

use crate::{collect_output, Machine};
use std::collections::VecDeque;

#[test]
fn test_relative_write_beyond_program() {
    // ARB #10; ADD #3 #4 rb[5]; OUT rb[5]; HALT
    let program = [109, 10, 21101, 3, 4, 5, 204, 5, 99];
    let mut machine = Machine::new(&program, VecDeque::new(), Vec::new());
    let memory = machine.run().unwrap();

    assert_eq!(memory, program.to_vec());
    assert_eq!(machine.memory().read(15), 7);
    assert_eq!(machine.memory().extended_cells(), vec![(15, 7)]);
    assert_eq!(machine.output(), &vec![7]);
}

#[test]
fn test_read_far_address_is_zero() {
    assert_eq!(collect_output(&[4, 1000, 99], []).unwrap(), vec![0]);
}

#[test]
fn test_relative_base_accumulates() {
    let program = [109, 3, 109, -1, 204, 0, 99];
    let mut machine = Machine::new(&program, VecDeque::new(), Vec::new());
    machine.run().unwrap();
    assert_eq!(machine.relative_base(), 2);
    assert_eq!(machine.output(), &vec![109]);
}

#[test]
fn test_relative_input_target() {
    // ARB #50; IN rb[0]; OUT [50]; HALT
    let program = [109, 50, 203, 0, 4, 50, 99];
    assert_eq!(collect_output(&program, [-9]).unwrap(), vec![-9]);
}

#[test]
fn test_immediate_write_target_overwrites_literal() {
    let mut machine = Machine::new(&[11101, 2, 3, 0, 99], VecDeque::new(), Vec::new());
    assert_eq!(machine.run().unwrap(), vec![11101, 2, 3, 5, 99]);
}

#[test]
fn test_immediate_input_target() {
    let mut machine = Machine::new(&[103, 0, 4, 1, 99], VecDeque::from([9]), Vec::new());
    assert_eq!(machine.run().unwrap(), vec![103, 9, 4, 1, 99]);
    assert_eq!(machine.output(), &vec![9]);
}
