//! External speech processes, run one at a time.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::{Invocation, SpeechError};

/// A running speech process.
#[async_trait]
pub trait SpeechProcess: Send {
    /// Waits for the process to exit.
    async fn wait(&mut self) -> Result<(), SpeechError>;
}

/// Interface for starting speech processes.
pub trait ProcessSpawner: Send + Sync {
    /// Starts `argv[0]` with the remaining arguments. Does not wait.
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn SpeechProcess>, SpeechError>;
}

/// Spawns real processes with [`tokio::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandSpawner;

impl ProcessSpawner for CommandSpawner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn SpeechProcess>, SpeechError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SpeechError::InvalidTemplate("empty argument vector".to_string()))?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(Box::new(ChildProcess {
            program: program.clone(),
            child,
        }))
    }
}

struct ChildProcess {
    program: String,
    child: Child,
}

#[async_trait]
impl SpeechProcess for ChildProcess {
    async fn wait(&mut self) -> Result<(), SpeechError> {
        let status = self.child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Exit {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Runs speech processes so that their output never overlaps.
///
/// Holds the most recently spawned process. Each new invocation first waits
/// for it to exit; there is no timeout.
pub struct Sequencer {
    spawner: Arc<dyn ProcessSpawner>,
    last: Mutex<Option<Box<dyn SpeechProcess>>>,
}

impl Sequencer {
    /// Creates a sequencer with no process running.
    pub fn new(spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self {
            spawner,
            last: Mutex::new(None),
        }
    }

    /// Runs the invocations in order, each after the previous one exits.
    ///
    /// Returns once the last invocation has been spawned. An invocation that
    /// fails to spawn is logged and skipped; the first such error is returned
    /// after the rest have run. Invocations from concurrent callers are not
    /// interleaved.
    pub async fn run_all(&self, invocations: &[Invocation]) -> Result<(), SpeechError> {
        let mut last = self.last.lock().await;
        let mut first_err = None;
        for invocation in invocations {
            if let Some(previous) = last.take() {
                wait_logged(previous).await;
            }
            debug!(kind = ?invocation.kind, argv = ?invocation.argv, "speech: spawning");
            match self.spawner.spawn(&invocation.argv) {
                Ok(process) => *last = Some(process),
                Err(e) => {
                    error!(error = %e, argv = ?invocation.argv, "speech: spawn failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Waits for the last spawned process, if any.
    pub async fn wait_idle(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = last.take() {
            wait_logged(previous).await;
        }
    }
}

async fn wait_logged(mut process: Box<dyn SpeechProcess>) {
    if let Err(e) = process.wait().await {
        error!(error = %e, "speech: previous process failed");
    }
}
