//! Input sources and output sinks
//!
//! A [`Machine`](crate::Machine) pulls one value from its [`Input`] for
//! every INPUT instruction and pushes one value into its [`Output`] for
//! every OUTPUT instruction. Either side may block; channel-backed
//! implementations live in [`crate::channel`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Why an input source could not produce a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No more values will arrive
    #[error("no more input")]
    Exhausted,

    /// Waited longer than the configured timeout
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// Received text that is not an integer
    #[error("not an integer: '{0}'")]
    Invalid(String),
}

/// Why an output sink rejected a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The consumer is gone
    #[error("output closed")]
    Closed,
}

/// Source of values for INPUT instructions
pub trait Input {
    /// Produce the next value, blocking if necessary
    fn read(&mut self) -> Result<i64, InputError>;
}

/// Sink for values from OUTPUT instructions
pub trait Output {
    /// Consume one value, blocking if necessary
    fn write(&mut self, value: i64) -> Result<(), OutputError>;
}

impl<T: Input + ?Sized> Input for &mut T {
    fn read(&mut self) -> Result<i64, InputError> {
        (**self).read()
    }
}

impl<T: Output + ?Sized> Output for &mut T {
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        (**self).write(value)
    }
}

impl<T: Input + ?Sized> Input for Box<T> {
    fn read(&mut self) -> Result<i64, InputError> {
        (**self).read()
    }
}

impl<T: Output + ?Sized> Output for Box<T> {
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        (**self).write(value)
    }
}

/// Replays pre-supplied values in order
impl Input for VecDeque<i64> {
    fn read(&mut self) -> Result<i64, InputError> {
        self.pop_front().ok_or(InputError::Exhausted)
    }
}

/// Collects every output in order
impl Output for Vec<i64> {
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        self.push(value);
        Ok(())
    }
}

/// Input that never has a value
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Input for NoInput {
    fn read(&mut self) -> Result<i64, InputError> {
        Err(InputError::Exhausted)
    }
}

/// Output that drops every value
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Output for Discard {
    fn write(&mut self, _value: i64) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Input backed by a closure; `None` means exhausted
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Wrap a closure as an [`Input`]
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<i64>,
{
    FromFn(f)
}

impl<F> Input for FromFn<F>
where
    F: FnMut() -> Option<i64>,
{
    fn read(&mut self) -> Result<i64, InputError> {
        (self.0)().ok_or(InputError::Exhausted)
    }
}

/// Output backed by a closure
#[derive(Debug, Clone)]
pub struct ToFn<F>(F);

/// Wrap a closure as an [`Output`]
pub fn to_fn<F>(f: F) -> ToFn<F>
where
    F: FnMut(i64),
{
    ToFn(f)
}

impl<F> Output for ToFn<F>
where
    F: FnMut(i64),
{
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        (self.0)(value);
        Ok(())
    }
}

/// Line-oriented console I/O: one integer per line in each direction
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Input for Console<R, W> {
    fn read(&mut self) -> Result<i64, InputError> {
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => Err(InputError::Exhausted),
            Ok(_) => {
                let text = self.line.trim();
                text.parse::<i64>()
                    .map_err(|_| InputError::Invalid(text.to_string()))
            }
            Err(err) => {
                warn!(error = %err, "console read failed");
                Err(InputError::Exhausted)
            }
        }
    }
}

impl<R: BufRead, W: Write> Output for Console<R, W> {
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", value)
            .and_then(|_| self.writer.flush())
            .map_err(|err| {
                warn!(error = %err, "console write failed");
                OutputError::Closed
            })
    }
}
