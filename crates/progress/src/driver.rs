//! Timer-driven progress driver.
//!
//! A driver owns one run per `start()`. The run ticks on a fixed cadence
//! inside a tokio task until it completes or its handle is stopped.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use docflow_core::{ProgressError, ProgressState, Result, RunId, Stage, StageSequence};

use crate::run::{Advance, ProgressRun};
use crate::sink::ProgressSink;

/// Driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Delay between ticks
    pub tick_interval: Duration,
    /// How far each tick moves the run
    pub advance: Advance,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(150),
            advance: Advance::default(),
        }
    }
}

impl DriverConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay between ticks.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Advance by a fixed step per tick.
    pub fn with_step(mut self, step: u8) -> Self {
        self.advance = Advance::Step(step);
        self
    }

    /// Advance one stage per tick.
    pub fn stage_by_stage(mut self) -> Self {
        self.advance = Advance::StageByStage;
        self
    }

    /// Check the settings can drive a run to completion.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(ProgressError::InvalidConfig {
                reason: "tick interval must be positive".to_string(),
            });
        }
        self.advance.validate()
    }
}

/// Starts simulated runs.
#[derive(Debug, Clone, Default)]
pub struct ProgressDriver {
    config: DriverConfig,
}

impl ProgressDriver {
    /// Create a driver.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Driver settings.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Start a run over `sequence`, emitting every snapshot to `sink`.
    ///
    /// Config errors are returned before anything is scheduled. Must be
    /// called from within a tokio runtime.
    pub fn start(
        &self,
        sequence: StageSequence,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<ProgressHandle> {
        self.config.validate()?;

        let run_id = RunId::new();
        let mut run = ProgressRun::new(run_id, sequence, self.config.advance)?;
        let initial = run.state().clone();
        let (tx, rx) = watch::channel(initial.clone());

        let shared = Arc::new(Shared {
            gate: Mutex::new(Gate {
                stopped: false,
                finished: false,
                aborted: false,
                last: initial,
                finished_at: None,
            }),
        });

        let period = self.config.tick_interval;
        info!(
            "Starting run {} ({} stages, {:?} per tick, {:?})",
            run_id,
            run.sequence().len(),
            period,
            self.config.advance
        );

        let exit = TaskExit {
            run_id,
            shared: shared.clone(),
            tx,
        };
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(state) = run.tick() else {
                    break;
                };

                // Emission and stop() serialize on the gate.
                let done = {
                    let mut gate = exit.shared.lock();
                    if gate.stopped {
                        debug!("Run {} stopped, dropping tick at {}%", run_id, state.percent);
                        true
                    } else {
                        debug!("Run {} at {}%: {}", run_id, state.percent, state.label);
                        sink.emit(&state);
                        exit.tx.send_replace(state.clone());

                        let complete = state.is_complete;
                        gate.last = state;
                        if complete {
                            gate.finished = true;
                            gate.finished_at = Some(Utc::now());
                            info!("Run {} complete after {} ticks", run_id, run.ticks());
                        }
                        complete
                    }
                };

                if done {
                    break;
                }
            }
        });

        Ok(ProgressHandle {
            run_id,
            started_at: Utc::now(),
            shared,
            rx,
            task,
        })
    }

    /// Build a sequence from raw stages and start a run over it.
    ///
    /// A malformed stage list fails with `InvalidSequence` before any tick
    /// is scheduled.
    pub fn start_stages(
        &self,
        stages: Vec<Stage>,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<ProgressHandle> {
        let sequence = StageSequence::new(stages)?;
        self.start(sequence, sink)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Reached 100 percent
    Completed,
    /// Stopped by its owner first
    Stopped,
    /// The run's task ended early, e.g. a sink panicked
    Aborted,
}

/// Final report of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// How the run ended
    pub status: RunStatus,
    /// Last snapshot emitted (the initial one if nothing was emitted)
    pub last: ProgressState,
    /// When the run was started
    pub started_at: DateTime<Utc>,
    /// When it completed or was stopped
    pub finished_at: DateTime<Utc>,
}

struct Gate {
    stopped: bool,
    finished: bool,
    aborted: bool,
    last: ProgressState,
    finished_at: Option<DateTime<Utc>>,
}

struct Shared {
    gate: Mutex<Gate>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Gate> {
        // A panicking sink must not wedge stop().
        self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Owned by the run's task. Dropping it without the run having finished or
/// been stopped marks the run aborted, before subscribers see the channel
/// close.
struct TaskExit {
    run_id: RunId,
    shared: Arc<Shared>,
    tx: watch::Sender<ProgressState>,
}

impl Drop for TaskExit {
    fn drop(&mut self) {
        let mut gate = self.shared.lock();
        if gate.finished || gate.stopped {
            return;
        }
        gate.aborted = true;
        gate.finished_at = Some(Utc::now());
        warn!("Run {} aborted at {}%", self.run_id, gate.last.percent);
    }
}

/// Owner's handle on a running simulation.
///
/// Dropping the handle stops the run.
pub struct ProgressHandle {
    run_id: RunId,
    started_at: DateTime<Utc>,
    shared: Arc<Shared>,
    rx: watch::Receiver<ProgressState>,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    /// Id of this run.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// When the run was started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Halt future ticks.
    ///
    /// Idempotent, and a no-op once the run has completed. When it returns,
    /// no further emission will reach the sink or subscribers.
    pub fn stop(&self) {
        {
            let mut gate = self.shared.lock();
            if gate.stopped || gate.finished || gate.aborted {
                return;
            }
            gate.stopped = true;
            gate.finished_at = Some(Utc::now());
            info!("Run {} stopped at {}%", self.run_id, gate.last.percent);
        }
        self.task.abort();
    }

    /// Whether `stop()` halted the run.
    pub fn is_stopped(&self) -> bool {
        self.shared.lock().stopped
    }

    /// Whether the run's task ended without completing or being stopped.
    pub fn is_aborted(&self) -> bool {
        self.shared.lock().aborted
    }

    /// Whether the run reached 100 percent.
    pub fn is_finished(&self) -> bool {
        self.shared.lock().finished
    }

    /// Latest snapshot.
    pub fn current(&self) -> ProgressState {
        self.shared.lock().last.clone()
    }

    /// Watch the latest snapshot.
    ///
    /// Intermediate values may be coalesced; use a sink to see every one.
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.rx.clone()
    }

    /// Wait until the run completes, is stopped or aborts.
    pub async fn wait(&self) -> RunOutcome {
        let mut rx = self.rx.clone();
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return self.outcome().unwrap_or_else(|| self.ended(RunStatus::Aborted));
            }
        }
    }

    fn outcome(&self) -> Option<RunOutcome> {
        let gate = self.shared.lock();
        let status = if gate.finished {
            RunStatus::Completed
        } else if gate.stopped {
            RunStatus::Stopped
        } else if gate.aborted {
            RunStatus::Aborted
        } else {
            return None;
        };

        Some(RunOutcome {
            status,
            last: gate.last.clone(),
            started_at: self.started_at,
            finished_at: gate.finished_at.unwrap_or_else(Utc::now),
        })
    }

    fn ended(&self, status: RunStatus) -> RunOutcome {
        let gate = self.shared.lock();
        RunOutcome {
            status,
            last: gate.last.clone(),
            started_at: self.started_at,
            finished_at: gate.finished_at.unwrap_or_else(Utc::now),
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ProgressHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressHandle")
            .field("run_id", &self.run_id)
            .field("started_at", &self.started_at)
            .finish()
    }
}
