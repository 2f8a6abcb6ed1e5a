//! Emergency override gate: a cooldown-gated one-shot escape hatch,
//! usable only while a focus session is running.
//!
//! The cooldown window is itself counted-down state -- there is no
//! external timeout mechanism. What "exiting" actually does is the
//! business of the collaborator consuming [`Event::OverrideTriggered`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::events::Event;

pub const DEFAULT_COOLDOWN_SECS: u32 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyOverride {
    armed: bool,
    cooldown_secs: u32,
    cooldown_remaining_secs: u32,
}

impl Default for EmergencyOverride {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_SECS)
    }
}

impl EmergencyOverride {
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            armed: false,
            cooldown_secs,
            cooldown_remaining_secs: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn cooldown_secs(&self) -> u32 {
        self.cooldown_secs
    }

    pub fn cooldown_remaining_secs(&self) -> u32 {
        self.cooldown_remaining_secs
    }

    /// Driven by the owner of the focus-session status on every status
    /// change: armed iff the session is running.
    pub fn set_armed(&mut self, armed: bool) {
        self.armed = armed;
    }

    /// One-shot: succeeds only while armed with no cooldown pending, and
    /// starts the cooldown.
    pub fn trigger(&mut self) -> Result<Event, EngineError> {
        if !self.armed {
            return Err(EngineError::NotArmed);
        }
        if self.cooldown_remaining_secs > 0 {
            return Err(EngineError::CooldownActive {
                remaining_secs: self.cooldown_remaining_secs,
            });
        }
        self.cooldown_remaining_secs = self.cooldown_secs;
        Ok(Event::OverrideTriggered {
            cooldown_secs: self.cooldown_secs,
            at: Utc::now(),
        })
    }

    /// Count the cooldown down by one second.
    pub fn tick(&mut self) {
        self.cooldown_remaining_secs = self.cooldown_remaining_secs.saturating_sub(1);
    }
}
