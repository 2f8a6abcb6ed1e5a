//! Free-running stopwatch: a degenerate timer that counts up without a
//! bound and never completes.

use serde::{Deserialize, Serialize};

use super::machine::TimerStatus;
use crate::error::EngineError;

/// Counts whole seconds upward while Running. Stop halts counting but
/// keeps the elapsed value; reset also zeroes it. The `Completed` status
/// is never used here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_secs: u64,
    status: TimerStatus,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            elapsed_secs: 0,
            status: TimerStatus::Idle,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(())
            }
            _ => Err(EngineError::InvalidTransition {
                command: "start",
                status: self.status,
            }),
        }
    }

    /// Toggling pause, same contract as the countdown machine.
    pub fn pause(&mut self) -> Result<(), EngineError> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Ok(())
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(())
            }
            _ => Err(EngineError::InvalidTransition {
                command: "pause",
                status: self.status,
            }),
        }
    }

    /// Halt counting; the elapsed value survives until `reset`.
    pub fn stop(&mut self) {
        self.status = TimerStatus::Idle;
    }

    /// Halt counting and zero the elapsed value.
    pub fn reset(&mut self) {
        self.status = TimerStatus::Idle;
        self.elapsed_secs = 0;
    }

    /// Advance by one second while Running. Unbounded; never emits
    /// a completion.
    pub fn tick(&mut self) {
        if self.status == TimerStatus::Running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }
}
