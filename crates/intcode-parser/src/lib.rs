//! Intcode program loader
//!
//! Programs are stored as one line of comma-separated decimal integers,
//! optionally signed:
//!
//! ```text
//! 1002,4,3,4,33
//! ```
//!
//! The grammar lives in `program.pest`. Cells are parsed into `i64`; a cell
//! that does not fit is reported as [`ParseError::Number`].

use pest::Parser;
use pest_derive::Parser;
use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[grammar = "program.pest"]
struct ProgramParser;

/// Errors produced while loading a program
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input does not match the program grammar
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A cell is well-formed but out of range
    #[error("invalid cell '{text}': {source}")]
    Number {
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// Program file could not be read
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse program text into memory cells
pub fn parse(source: &str) -> Result<Vec<i64>, ParseError> {
    let program = ProgramParser::parse(Rule::program, source)
        .map_err(|e| ParseError::Syntax(e.to_string()))?
        .next()
        .ok_or_else(|| ParseError::Syntax("empty input".to_string()))?;

    program
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::cell)
        .map(|pair| parse_cell(pair.as_str()))
        .collect()
}

/// Read and parse a program file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<i64>, ParseError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents)
}

fn parse_cell(text: &str) -> Result<i64, ParseError> {
    text.parse::<i64>().map_err(|source| ParseError::Number {
        text: text.to_string(),
        source,
    })
}
