//! Recurring day-of-week alarms evaluated against wall-clock time.
//!
//! Unlike the tick-counting timers, alarms match absolute time of day.
//! `evaluate` may be called any number of times within a minute (nominally
//! once per second) and fires each alarm at most once per calendar minute;
//! the last-fired minute slot re-arms automatically when the minute rolls
//! over, so recurring alarms fire every matching day without being
//! re-added.

use chrono::{Datelike, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::events::Event;

pub const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    pub hour: u8,
    pub minute: u8,
    pub label: String,
    pub enabled: bool,
    /// Monday .. Sunday.
    pub days: [bool; 7],
    /// Minute slot (seconds truncated) of the last firing; dedupes
    /// repeated `evaluate` calls within one calendar minute.
    #[serde(default)]
    last_fired: Option<NaiveDateTime>,
}

impl Alarm {
    /// "Mon, Tue, Wed" style summary of the active days.
    pub fn days_summary(&self) -> String {
        let names: Vec<&str> = self
            .days
            .iter()
            .zip(DAY_NAMES)
            .filter_map(|(&on, name)| on.then_some(name))
            .collect();
        names.join(", ")
    }
}

/// Owns the alarm collection; ids are unique within it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmScheduler {
    alarms: Vec<Alarm>,
}

impl AlarmScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        hour: u8,
        minute: u8,
        label: impl Into<String>,
        days: [bool; 7],
    ) -> Result<Uuid, EngineError> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidTimeOfDay { hour, minute });
        }
        let id = Uuid::new_v4();
        self.alarms.push(Alarm {
            id,
            hour,
            minute,
            label: label.into(),
            enabled: true,
            days,
            last_fired: None,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), EngineError> {
        let idx = self
            .alarms
            .iter()
            .position(|a| a.id == id)
            .ok_or(EngineError::NotFound(id))?;
        self.alarms.remove(idx);
        Ok(())
    }

    /// Flip `enabled`; returns the new value.
    pub fn toggle(&mut self, id: Uuid) -> Result<bool, EngineError> {
        let alarm = self
            .alarms
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(EngineError::NotFound(id))?;
        alarm.enabled = !alarm.enabled;
        Ok(alarm.enabled)
    }

    pub fn get(&self, id: Uuid) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms.iter()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Fire every enabled alarm whose time of day and weekday match `now`,
    /// at most once per alarm per calendar minute. Idempotent within a
    /// minute.
    pub fn evaluate(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let day = now.weekday().num_days_from_monday() as usize;
        let Some(slot) = now.with_second(0).and_then(|t| t.with_nanosecond(0)) else {
            return Vec::new();
        };

        let mut fired = Vec::new();
        for alarm in &mut self.alarms {
            if !alarm.enabled || !alarm.days[day] {
                continue;
            }
            if u32::from(alarm.hour) != now.hour() || u32::from(alarm.minute) != now.minute() {
                continue;
            }
            if alarm.last_fired == Some(slot) {
                continue;
            }
            alarm.last_fired = Some(slot);
            fired.push(Event::AlarmFired {
                alarm_id: alarm.id,
                label: alarm.label.clone(),
                at: Utc::now(),
            });
        }
        fired
    }
}
