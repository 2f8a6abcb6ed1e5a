use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::Phase;

/// Every observable state change produces an `Event`.
///
/// The engine never performs side effects itself -- what a completion or
/// an alarm firing *means* to the user is the business of an external
/// notifier; the engine only counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// One advance of the shared 1-second clock.
    Tick { at: DateTime<Utc> },
    TimerStarted {
        label: Option<String>,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped { at: DateTime<Utc> },
    TimerCompleted {
        label: Option<String>,
        at: DateTime<Utc>,
    },
    /// A Pomodoro cycle flipped between work and break.
    PhaseChanged {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    /// An enabled alarm matched the current wall-clock minute.
    AlarmFired {
        alarm_id: Uuid,
        label: String,
        at: DateTime<Utc>,
    },
    /// The emergency override fired and its cooldown began.
    OverrideTriggered {
        cooldown_secs: u32,
        at: DateTime<Utc>,
    },
}
