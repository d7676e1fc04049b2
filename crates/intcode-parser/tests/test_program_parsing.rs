//! Parser tests for the program load format
//!
//! These tests cover the accepted shapes of a program line and the
//! failures a malformed file should report.

use intcode_parser::{load, parse, ParseError};
use proptest::prelude::*;

#[test]
fn test_parse_simple_program() {
    let cells = parse("1,0,0,0,99").unwrap();
    assert_eq!(cells, vec![1, 0, 0, 0, 99]);
}

#[test]
fn test_parse_negative_cells() {
    let cells = parse("109,1,204,-1,99").unwrap();
    assert_eq!(cells, vec![109, 1, 204, -1, 99]);
}

#[test]
fn test_parse_trailing_newline() {
    let cells = parse("3,0,4,0,99\n").unwrap();
    assert_eq!(cells, vec![3, 0, 4, 0, 99]);
}

#[test]
fn test_parse_spaces_between_cells() {
    let cells = parse(" 1, 2 ,3 ").unwrap();
    assert_eq!(cells, vec![1, 2, 3]);
}

#[test]
fn test_parse_large_cell() {
    let cells = parse("104,1125899906842624,99").unwrap();
    assert_eq!(cells[1], 1_125_899_906_842_624);
}

#[test]
fn test_reject_empty_input() {
    assert!(matches!(parse(""), Err(ParseError::Syntax(_))));
    assert!(matches!(parse("\n"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_reject_trailing_comma() {
    assert!(matches!(parse("1,2,"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_reject_non_numeric_cell() {
    assert!(matches!(parse("1,x,3"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_reject_out_of_range_cell() {
    let err = parse("1,-99999999999999999999").unwrap_err();
    match err {
        ParseError::Number { text, .. } => assert_eq!(text, "-99999999999999999999"),
        other => panic!("Expected Number error, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let err = load("does/not/exist.intcode").unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.intcode"));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("intcode-parser-{}.txt", std::process::id()));
    std::fs::write(&path, "1002,4,3,4,33\n").unwrap();
    let cells = load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cells, vec![1002, 4, 3, 4, 33]);
}

proptest! {
    #[test]
    fn prop_parse_accepts_joined_cells(cells in prop::collection::vec(any::<i64>(), 1..64)) {
        let text = cells
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        prop_assert_eq!(parse(&text).unwrap(), cells);
    }
}
