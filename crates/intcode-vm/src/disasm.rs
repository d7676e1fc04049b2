//! Program disassembly
//!
//! Walks a program linearly from address 0. Cells that decode to a known
//! opcode with valid modes and fit inside the program are rendered as
//! instructions; everything else is rendered as `DATA`. Since code and data
//! share memory, the listing is a best-effort view.

use crate::opcode::{decode, Mode, OpCode};
use std::fmt::Write;

/// One listing line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Address of the first cell
    pub address: usize,
    /// Raw cells covered by this line
    pub cells: Vec<i64>,
    /// Rendered instruction
    pub text: String,
}

/// Disassemble a program into listing lines
pub fn disassemble(program: &[i64]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut address = 0;

    while address < program.len() {
        let line = decode_at(program, address).unwrap_or_else(|| Line {
            address,
            cells: vec![program[address]],
            text: format!("DATA        {}", program[address]),
        });
        address += line.cells.len();
        lines.push(line);
    }

    lines
}

/// Render a full listing
pub fn format_listing(program: &[i64]) -> String {
    let mut out = String::new();
    for line in disassemble(program) {
        let cells = line
            .cells
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{:04}  {:<28}{}", line.address, cells, line.text);
    }
    out
}

/// Try to decode an instruction at `address`
fn decode_at(program: &[i64], address: usize) -> Option<Line> {
    let instruction = decode(program[address]);
    let opcode = OpCode::from_i64(instruction.opcode())?;
    let end = address + opcode.width() as usize;
    let cells = program.get(address..end)?;

    let mut text = format!("{:<12}", opcode.name());
    for index in 1..=opcode.arity() {
        let mode = instruction.mode(index).ok()?;
        let raw = cells[index];
        if index > 1 {
            text.push(' ');
        }
        match mode {
            Mode::Position => write!(text, "[{}]", raw),
            Mode::Immediate => write!(text, "#{}", raw),
            Mode::Relative => write!(text, "rb[{}]", raw),
        }
        .ok()?;
    }

    Some(Line {
        address,
        cells: cells.to_vec(),
        text: text.trim_end().to_string(),
    })
}
