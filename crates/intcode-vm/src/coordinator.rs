//! Multi-machine coordinators
//!
//! Thin orchestration over [`Machine`] and [`crate::channel`]:
//!
//! - [`chain`]: machines run one after another, each fed a phase and the
//!   previous machine's last output.
//! - [`Ring`]: machines run concurrently, output of machine *k* wired to
//!   the input of machine *k+1*, the last one feeding the first.
//! - [`spawn`]: one machine in the background, driven by a controller
//!   through a [`Session`].
//!
//! A machine always closes its output link when it stops. A failure
//! therefore reaches its neighbours as exhausted input, and the whole
//! ring unwinds instead of waiting forever.

use crate::channel::{link, ChannelInput, ChannelOutput};
use crate::error::VmError;
use crate::io::{Input, Output, OutputError};
use crate::vm::Machine;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Link settings shared by rings and sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Values a link holds before the sender blocks; unbounded when unset
    pub capacity: Option<usize>,

    /// Fail a machine whose input stays silent this long (rings only)
    pub input_timeout_ms: Option<u64>,
}

impl LinkConfig {
    pub fn input_timeout(&self) -> Option<Duration> {
        self.input_timeout_ms.map(Duration::from_millis)
    }
}

/// Coordinator errors
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Nothing to run
    #[error("no machines to run")]
    Empty,

    /// A machine stopped with an error
    #[error("machine {index} failed: {source}")]
    Machine {
        index: usize,
        #[source]
        source: VmError,
    },

    /// Every machine halted but no value came out
    #[error("machine {index} produced no output")]
    NoResult { index: usize },

    /// A link was closed before the machines started
    #[error("link {index} closed while priming: {source}")]
    Link {
        index: usize,
        #[source]
        source: OutputError,
    },

    /// A machine thread panicked
    #[error("machine {index} panicked")]
    Join { index: usize },

    /// Runtime or worker thread could not be started
    #[error("failed to start workers: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Run machines back to back
///
/// Machine *k* reads `phases[k]`, then the previous result (`input` for the
/// first machine). The last value the final machine outputs is returned.
pub fn chain(program: &[i64], phases: &[i64], input: i64) -> Result<i64, CoordinatorError> {
    if phases.is_empty() {
        return Err(CoordinatorError::Empty);
    }

    phases
        .iter()
        .enumerate()
        .try_fold(input, |signal, (index, &phase)| {
            let mut machine = Machine::new(program, VecDeque::from([phase, signal]), Vec::new());
            machine
                .run()
                .map_err(|source| CoordinatorError::Machine { index, source })?;

            let (_, outputs) = machine.into_parts();
            let result = outputs
                .last()
                .copied()
                .ok_or(CoordinatorError::NoResult { index })?;
            debug!(index, phase, signal, result, "chain stage finished");
            Ok(result)
        })
}

/// Feedback ring of machines sharing one program
#[derive(Debug, Clone, Default)]
pub struct Ring {
    config: LinkConfig,
}

impl Ring {
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Run the ring on a private multi-threaded runtime
    pub fn run(&self, program: &[i64], phases: &[i64], seed: i64) -> Result<i64, CoordinatorError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run_async(program, phases, seed))
    }

    /// Run the ring on the current multi-threaded runtime
    ///
    /// Link *k* is primed with `phases[k]`; link 0 also gets `seed`. Once
    /// every machine has stopped, the oldest value left unread on link 0 is
    /// the result. If any machine failed, the most informative error is
    /// returned: a machine that failed on its own beats one that merely
    /// lost a neighbour.
    pub async fn run_async(
        &self,
        program: &[i64],
        phases: &[i64],
        seed: i64,
    ) -> Result<i64, CoordinatorError> {
        if phases.is_empty() {
            return Err(CoordinatorError::Empty);
        }
        let count = phases.len();

        // Link 0 must hold both its phase and the seed
        let capacity = self.config.capacity.map(|c| c.max(2));
        let (mut senders, receivers): (Vec<ChannelOutput>, Vec<ChannelInput>) =
            (0..count).map(|_| link(capacity)).unzip();

        for (index, (sender, &phase)) in senders.iter().zip(phases).enumerate() {
            sender
                .send(phase)
                .await
                .map_err(|source| CoordinatorError::Link { index, source })?;
        }
        senders[0]
            .send(seed)
            .await
            .map_err(|source| CoordinatorError::Link { index: 0, source })?;

        // Machine k writes into link k + 1
        senders.rotate_left(1);

        info!(machines = count, "ring starting");
        let program: Arc<[i64]> = Arc::from(program);
        let timeout = self.config.input_timeout();
        let handle = Handle::current();

        let tasks = receivers
            .into_iter()
            .zip(senders)
            .enumerate()
            .map(|(index, (input, output))| {
                let input = match timeout {
                    Some(timeout) => input.with_timeout(handle.clone(), timeout),
                    None => input,
                };
                let program = Arc::clone(&program);
                tokio::task::spawn_blocking(move || run_ring_member(index, &program, input, output))
            });
        let joined = join_all(tasks).await;

        let mut leftover = None;
        let mut failures = Vec::new();
        for (index, outcome) in joined.into_iter().enumerate() {
            match outcome {
                Ok(Ok(values)) if index == 0 => leftover = Some(values),
                Ok(Ok(_)) => {}
                Ok(Err(source)) => failures.push((index, source)),
                Err(_) => return Err(CoordinatorError::Join { index }),
            }
        }

        if !failures.is_empty() {
            let root = failures
                .iter()
                .position(|(_, err)| !err.is_disconnect())
                .unwrap_or(0);
            let (index, source) = failures.swap_remove(root);
            warn!(index, error = %source, "ring failed");
            return Err(CoordinatorError::Machine { index, source });
        }

        let result = leftover
            .and_then(|values| values.first().copied())
            .ok_or(CoordinatorError::NoResult { index: count - 1 })?;
        info!(result, "ring finished");
        Ok(result)
    }
}

/// Run one ring member to completion
///
/// A halted member keeps reading its input link until the upstream
/// neighbour stops, so a bounded link never stalls on a machine that is
/// gone. The values it never consumed are returned in arrival order. On
/// failure the link is dropped, which fails the upstream neighbour's
/// next send.
fn run_ring_member(
    index: usize,
    program: &[i64],
    input: ChannelInput,
    output: ChannelOutput,
) -> Result<Vec<i64>, VmError> {
    let mut machine = Machine::new(program, input, output);
    let result = machine.run();
    let (mut input, output) = machine.into_parts();
    drop(output);

    match result {
        Ok(_) => {
            let leftover = input.drain_until_closed();
            debug!(index, unread = leftover.len(), "ring member halted");
            Ok(leftover)
        }
        Err(err) => {
            warn!(index, error = %err, "ring member failed");
            Err(err)
        }
    }
}

/// Controller-side handle to a machine running in the background
///
/// The controller feeds inputs with [`send`](Session::send) and reads
/// outputs with [`recv`](Session::recv). `recv` returns `None` once the
/// machine has stopped and every output has been read. Both calls block
/// and must not be made from inside an async task.
pub struct Session {
    input: ChannelOutput,
    output: ChannelInput,
    worker: thread::JoinHandle<Result<Vec<i64>, VmError>>,
}

/// Start a machine on its own thread
pub fn spawn(program: &[i64], config: &LinkConfig) -> Result<Session, CoordinatorError> {
    let (input, machine_input) = link(config.capacity);
    let (machine_output, output) = link(config.capacity);
    let program = program.to_vec();

    let worker = thread::Builder::new()
        .name("intcode-session".to_string())
        .spawn(move || Machine::new(&program, machine_input, machine_output).run())?;

    Ok(Session {
        input,
        output,
        worker,
    })
}

impl Session {
    /// Feed one value to the machine
    pub fn send(&mut self, value: i64) -> Result<(), OutputError> {
        self.input.write(value)
    }

    /// Wait for the machine's next output
    pub fn recv(&mut self) -> Option<i64> {
        self.output.read().ok()
    }

    /// Close both links and wait for the machine
    ///
    /// A machine still waiting for input fails with exhausted input.
    /// Outputs not yet read are lost.
    pub fn join(self) -> Result<Vec<i64>, CoordinatorError> {
        let Session {
            input,
            output,
            worker,
        } = self;
        drop(input);
        drop(output);

        worker
            .join()
            .map_err(|_| CoordinatorError::Join { index: 0 })?
            .map_err(|source| CoordinatorError::Machine { index: 0, source })
    }
}
