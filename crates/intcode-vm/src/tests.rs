//! Integration tests for the machine

use crate::{collect_output, execute, Machine, Status};
use std::collections::VecDeque;

mod addressing;
mod errors;

/// Comparison program from the diagnostics suite: outputs 999 below 8,
/// 1000 at 8 and 1001 above
pub(crate) const COMPARE_TO_EIGHT: &[i64] = &[
    3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0, 0,
    1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4, 20, 1105,
    1, 46, 98, 99,
];

/// Helper to run a program to completion on fixed inputs
fn run_with(program: &[i64], inputs: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let mut machine = Machine::new(program, VecDeque::from(inputs.to_vec()), Vec::new());
    let memory = machine.run().unwrap();
    let (_, outputs) = machine.into_parts();
    (memory, outputs)
}

#[test]
fn test_add_rewrites_memory() {
    assert_eq!(execute(&[1, 0, 0, 0, 99]).unwrap(), vec![2, 0, 0, 0, 99]);
}

#[test]
fn test_mul_rewrites_memory() {
    assert_eq!(execute(&[2, 3, 0, 3, 99]).unwrap(), vec![2, 3, 0, 6, 99]);
}

#[test]
fn test_mul_past_halt() {
    assert_eq!(
        execute(&[2, 4, 4, 5, 99, 0]).unwrap(),
        vec![2, 4, 4, 5, 99, 9801]
    );
}

#[test]
fn test_self_modifying_program() {
    assert_eq!(
        execute(&[1, 1, 1, 4, 99, 5, 6, 0, 99]).unwrap(),
        vec![30, 1, 1, 4, 2, 5, 6, 0, 99]
    );
}

#[test]
fn test_caller_program_untouched() {
    let program = vec![1, 0, 0, 0, 99];
    execute(&program).unwrap();
    assert_eq!(program, vec![1, 0, 0, 0, 99]);
}

#[test]
fn test_quine() {
    let program = [
        109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
    ];
    assert_eq!(collect_output(&program, []).unwrap(), program.to_vec());
}

#[test]
fn test_sixteen_digit_product() {
    let outputs = collect_output(&[1102, 34915192, 34915192, 7, 4, 7, 99, 0], []).unwrap();
    assert_eq!(outputs, vec![1_219_070_632_396_864]);
    assert_eq!(outputs[0].to_string().len(), 16);
}

#[test]
fn test_large_literal_output() {
    let outputs = collect_output(&[104, 1125899906842624, 99], []).unwrap();
    assert_eq!(outputs, vec![1_125_899_906_842_624]);
}

#[test]
fn test_echo_input() {
    assert_eq!(collect_output(&[3, 0, 4, 0, 99], [42]).unwrap(), vec![42]);
}

#[test]
fn test_negative_immediate() {
    assert_eq!(execute(&[1101, 100, -1, 4, 0]).unwrap(), vec![1101, 100, -1, 4, 99]);
}

#[test]
fn test_compare_to_eight() {
    assert_eq!(collect_output(COMPARE_TO_EIGHT, [7]).unwrap(), vec![999]);
    assert_eq!(collect_output(COMPARE_TO_EIGHT, [8]).unwrap(), vec![1000]);
    assert_eq!(collect_output(COMPARE_TO_EIGHT, [9]).unwrap(), vec![1001]);
}

#[test]
fn test_equal_and_less_than() {
    // position mode
    let eq = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
    let lt = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
    assert_eq!(collect_output(&eq, [8]).unwrap(), vec![1]);
    assert_eq!(collect_output(&eq, [5]).unwrap(), vec![0]);
    assert_eq!(collect_output(&lt, [5]).unwrap(), vec![1]);
    assert_eq!(collect_output(&lt, [8]).unwrap(), vec![0]);

    // immediate mode
    let eq = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
    let lt = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
    assert_eq!(collect_output(&eq, [8]).unwrap(), vec![1]);
    assert_eq!(collect_output(&lt, [9]).unwrap(), vec![0]);
}

#[test]
fn test_jumps() {
    let position = [3, 12, 6, 12, 15, 1, 13, 14, 13, 4, 13, 99, -1, 0, 1, 9];
    let immediate = [3, 3, 1105, -1, 9, 1101, 0, 0, 12, 4, 12, 99, 1];
    for program in [&position[..], &immediate[..]] {
        assert_eq!(collect_output(program, [0]).unwrap(), vec![0]);
        assert_eq!(collect_output(program, [17]).unwrap(), vec![1]);
    }
}

#[test]
fn test_step_until_halt() {
    let mut machine = Machine::new(&[1101, 2, 3, 5, 99, 0], VecDeque::new(), Vec::new());
    assert_eq!(machine.step().unwrap(), Status::Running);
    assert_eq!(machine.position(), 4);
    assert_eq!(machine.step().unwrap(), Status::Halted);
    assert!(machine.is_halted());
    assert_eq!(machine.memory().read(5), 5);

    // halted machines stay put
    assert_eq!(machine.step().unwrap(), Status::Halted);
    assert_eq!(machine.position(), 4);
    assert_eq!(machine.run().unwrap(), vec![1101, 2, 3, 5, 99, 5]);
}

#[test]
fn test_runs_are_deterministic() {
    let inputs = [8];
    let first = run_with(COMPARE_TO_EIGHT, &inputs);
    let second = run_with(COMPARE_TO_EIGHT, &inputs);
    assert_eq!(first, second);
}
