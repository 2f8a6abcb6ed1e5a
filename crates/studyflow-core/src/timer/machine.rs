//! Generic countdown state machine.
//!
//! One machine backs the focus session, the countdown timer and the inner
//! timer of the Pomodoro cycle -- they differ only in where their
//! configuration comes from. The machine has no internal clock: the caller
//! invokes `tick()` once per wall-clock second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --pause--> Running
//! Running --tick(to 0)--> Completed --start--> Running
//! any --stop--> Idle
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Planned duration and optional label. Immutable once a run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    pub duration_secs: u64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Core countdown machine.
///
/// `remaining_secs` only decreases while Running, saturates at 0, and
/// status `Completed` implies `remaining_secs == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerMachine {
    config: TimerConfig,
    remaining_secs: u64,
    status: TimerStatus,
}

impl TimerMachine {
    pub fn new(duration_secs: u64, label: Option<String>) -> Result<Self, EngineError> {
        if duration_secs == 0 {
            return Err(EngineError::InvalidDuration(duration_secs));
        }
        Ok(Self {
            config: TimerConfig {
                duration_secs,
                label,
            },
            remaining_secs: duration_secs,
            status: TimerStatus::Idle,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.config.duration_secs
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// 0.0 .. 1.0 progress within the current run.
    pub fn progress(&self) -> f64 {
        if self.config.duration_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.config.duration_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the planned duration and label. Rejected mid-run; resets
    /// the machine to Idle with the new duration remaining.
    pub fn configure(
        &mut self,
        duration_secs: u64,
        label: Option<String>,
    ) -> Result<(), EngineError> {
        if duration_secs == 0 {
            return Err(EngineError::InvalidDuration(duration_secs));
        }
        if self.status == TimerStatus::Running {
            return Err(EngineError::InvalidTransition {
                command: "configure",
                status: self.status,
            });
        }
        self.reprogram(duration_secs, label);
        Ok(())
    }

    /// Swap in a new pre-validated duration. Callers guarantee
    /// `duration_secs > 0` and the machine not Running.
    pub(crate) fn reprogram(&mut self, duration_secs: u64, label: Option<String>) {
        debug_assert!(duration_secs > 0);
        self.config = TimerConfig {
            duration_secs,
            label,
        };
        self.remaining_secs = duration_secs;
        self.status = TimerStatus::Idle;
    }

    pub fn start(&mut self) -> Result<Event, EngineError> {
        if self.status == TimerStatus::Running {
            return Err(EngineError::InvalidTransition {
                command: "start",
                status: self.status,
            });
        }
        Ok(self.begin())
    }

    /// Unconditional start. Restarting from Completed restores the planned
    /// duration; from Paused this resumes the existing remaining value.
    pub(crate) fn begin(&mut self) -> Event {
        match self.status {
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                }
            }
            _ => {
                if self.status == TimerStatus::Completed {
                    self.remaining_secs = self.config.duration_secs;
                }
                self.status = TimerStatus::Running;
                Event::TimerStarted {
                    label: self.config.label.clone(),
                    duration_secs: self.config.duration_secs,
                    at: Utc::now(),
                }
            }
        }
    }

    /// Toggling pause: Running pauses, Paused resumes.
    pub fn pause(&mut self) -> Result<Event, EngineError> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Ok(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => Err(EngineError::InvalidTransition {
                command: "pause",
                status: self.status,
            }),
        }
    }

    /// Any state to Idle, remaining restored to the planned duration.
    /// Configuration is kept.
    pub fn stop(&mut self) -> Event {
        self.status = TimerStatus::Idle;
        self.remaining_secs = self.config.duration_secs;
        Event::TimerStopped { at: Utc::now() }
    }

    /// Advance by one second. Effective only while Running; returns the
    /// completion event exactly once per run.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Completed;
            return Some(Event::TimerCompleted {
                label: self.config.label.clone(),
                at: Utc::now(),
            });
        }
        None
    }
}
