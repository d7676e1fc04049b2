//! OpCode definitions and instruction decoding
//!
//! An instruction word packs the opcode into its two lowest decimal digits
//! and one addressing mode per parameter into each digit above them, least
//! significant first:
//!
//! ```text
//!   1002  →  0 1 0 | 02
//!            │ │ │   └─ opcode 2 (MUL)
//!            │ │ └───── parameter 1: mode 0 (position)
//!            │ └─────── parameter 2: mode 1 (immediate)
//!            └───────── parameter 3: mode 0 (missing digit)
//! ```

use std::fmt;

/// Machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Addition: [C] = A + B
    Add = 1,
    /// Multiplication: [C] = A * B
    Mul = 2,
    /// Read input: [A] = input()
    Input = 3,
    /// Write output: output(A)
    Output = 4,
    /// Jump if true: if A != 0 then IP = B
    JumpIfTrue = 5,
    /// Jump if false: if A == 0 then IP = B
    JumpIfFalse = 6,
    /// Less than: [C] = A < B
    LessThan = 7,
    /// Equals: [C] = A == B
    Equals = 8,
    /// Adjust relative base: RB += A
    AdjustRelativeBase = 9,
    /// Halt execution
    Halt = 99,
}

impl OpCode {
    /// Convert opcode to u8
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert a raw opcode (instruction word mod 100) to an OpCode
    pub fn from_i64(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(OpCode::Add),
            2 => Some(OpCode::Mul),
            3 => Some(OpCode::Input),
            4 => Some(OpCode::Output),
            5 => Some(OpCode::JumpIfTrue),
            6 => Some(OpCode::JumpIfFalse),
            7 => Some(OpCode::LessThan),
            8 => Some(OpCode::Equals),
            9 => Some(OpCode::AdjustRelativeBase),
            99 => Some(OpCode::Halt),
            _ => None,
        }
    }

    /// Get opcode mnemonic
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::Input => "IN",
            OpCode::Output => "OUT",
            OpCode::JumpIfTrue => "JNZ",
            OpCode::JumpIfFalse => "JZ",
            OpCode::LessThan => "LT",
            OpCode::Equals => "EQ",
            OpCode::AdjustRelativeBase => "ARB",
            OpCode::Halt => "HALT",
        }
    }

    /// Number of cells the instruction occupies, opcode included
    pub fn width(&self) -> i64 {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::LessThan | OpCode::Equals => 4,
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => 3,
            OpCode::Input | OpCode::Output | OpCode::AdjustRelativeBase => 2,
            OpCode::Halt => 1,
        }
    }

    /// Number of parameters following the opcode
    pub fn arity(&self) -> usize {
        (self.width() - 1) as usize
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parameter addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Parameter is an address
    #[default]
    Position,
    /// Parameter is the operand itself
    Immediate,
    /// Parameter is an offset from the relative base
    Relative,
}

impl TryFrom<i64> for Mode {
    /// The offending digit
    type Error = i64;

    fn try_from(digit: i64) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            other => Err(other),
        }
    }
}

/// A decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    word: i64,
}

/// Decode an instruction word
#[inline]
pub fn decode(word: i64) -> Instruction {
    Instruction { word }
}

impl Instruction {
    /// Raw instruction word
    pub fn word(&self) -> i64 {
        self.word
    }

    /// Raw opcode: the word modulo 100
    pub fn opcode(&self) -> i64 {
        self.word.rem_euclid(100)
    }

    /// Mode digit for a 1-based parameter index
    pub fn mode_digit(&self, index: usize) -> i64 {
        let mut rest = self.word.div_euclid(100);
        for _ in 1..index {
            rest = rest.div_euclid(10);
        }
        rest.rem_euclid(10)
    }

    /// Addressing mode for a 1-based parameter index
    ///
    /// Returns the offending digit when it is not a known mode.
    pub fn mode(&self, index: usize) -> Result<Mode, i64> {
        Mode::try_from(self.mode_digit(index))
    }
}
