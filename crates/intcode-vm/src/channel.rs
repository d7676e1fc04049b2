//! Channel-backed inputs and outputs
//!
//! A link is a FIFO between one producing machine (or controller) and one
//! consuming machine, built on `tokio::sync::mpsc`. Links are either
//! unbounded, where sends never block, or bounded, where a send blocks
//! while the link is full.
//!
//! Dropping the [`ChannelOutput`] end is the "no more input" signal: once
//! the queue drains, the consumer sees [`InputError::Exhausted`].
//!
//! The blocking [`Input`]/[`Output`] implementations must not be used from
//! inside an async task. Run machines on `spawn_blocking` or plain threads.

use crate::io::{Input, InputError, Output, OutputError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError};

#[derive(Debug, Clone)]
enum Sender {
    Bounded(mpsc::Sender<i64>),
    Unbounded(mpsc::UnboundedSender<i64>),
}

#[derive(Debug)]
enum Receiver {
    Bounded(mpsc::Receiver<i64>),
    Unbounded(mpsc::UnboundedReceiver<i64>),
}

impl Receiver {
    async fn recv(&mut self) -> Option<i64> {
        match self {
            Receiver::Bounded(rx) => rx.recv().await,
            Receiver::Unbounded(rx) => rx.recv().await,
        }
    }

    fn blocking_recv(&mut self) -> Option<i64> {
        match self {
            Receiver::Bounded(rx) => rx.blocking_recv(),
            Receiver::Unbounded(rx) => rx.blocking_recv(),
        }
    }

    fn try_recv(&mut self) -> Result<i64, TryRecvError> {
        match self {
            Receiver::Bounded(rx) => rx.try_recv(),
            Receiver::Unbounded(rx) => rx.try_recv(),
        }
    }
}

/// Create a link; `None` is unbounded, `Some(n)` holds at most `n` values
pub fn link(capacity: Option<usize>) -> (ChannelOutput, ChannelInput) {
    let (sender, receiver) = match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (Sender::Bounded(tx), Receiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (Sender::Unbounded(tx), Receiver::Unbounded(rx))
        }
    };

    (
        ChannelOutput { sender },
        ChannelInput {
            receiver,
            timeout: None,
        },
    )
}

/// Producing end of a link
#[derive(Debug, Clone)]
pub struct ChannelOutput {
    sender: Sender,
}

impl ChannelOutput {
    /// Send from async code, waiting for capacity without blocking the runtime
    pub async fn send(&self, value: i64) -> Result<(), OutputError> {
        match &self.sender {
            Sender::Bounded(tx) => tx.send(value).await.map_err(|_| OutputError::Closed),
            Sender::Unbounded(tx) => tx.send(value).map_err(|_| OutputError::Closed),
        }
    }

    /// Whether the consuming end is gone
    pub fn is_closed(&self) -> bool {
        match &self.sender {
            Sender::Bounded(tx) => tx.is_closed(),
            Sender::Unbounded(tx) => tx.is_closed(),
        }
    }
}

impl Output for ChannelOutput {
    fn write(&mut self, value: i64) -> Result<(), OutputError> {
        match &self.sender {
            Sender::Bounded(tx) => tx.blocking_send(value).map_err(|_| OutputError::Closed),
            Sender::Unbounded(tx) => tx.send(value).map_err(|_| OutputError::Closed),
        }
    }
}

/// Consuming end of a link
#[derive(Debug)]
pub struct ChannelInput {
    receiver: Receiver,
    timeout: Option<(Handle, Duration)>,
}

impl ChannelInput {
    /// Bound every blocking read by `timeout`
    ///
    /// `handle` must belong to a multi-threaded runtime so its timer keeps
    /// running while this thread waits.
    pub fn with_timeout(mut self, handle: Handle, timeout: Duration) -> Self {
        self.timeout = Some((handle, timeout));
        self
    }

    /// Receive from async code; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<i64> {
        self.receiver.recv().await
    }

    /// Take a queued value without waiting
    pub fn try_recv(&mut self) -> Option<i64> {
        self.receiver.try_recv().ok()
    }

    /// Take every value queued right now
    pub fn drain(&mut self) -> Vec<i64> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Block until every sender is gone, collecting what arrives
    ///
    /// Ignores any read timeout. Must not be called from an async task.
    pub fn drain_until_closed(&mut self) -> Vec<i64> {
        std::iter::from_fn(|| self.receiver.blocking_recv()).collect()
    }
}

impl Input for ChannelInput {
    fn read(&mut self) -> Result<i64, InputError> {
        let received = match &self.timeout {
            Some((handle, timeout)) => {
                let timeout = *timeout;
                let receiver = &mut self.receiver;
                handle
                    .block_on(tokio::time::timeout(timeout, receiver.recv()))
                    .map_err(|_| InputError::TimedOut(timeout))?
            }
            None => self.receiver.blocking_recv(),
        };
        received.ok_or(InputError::Exhausted)
    }
}
