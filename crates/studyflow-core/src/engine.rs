//! The single logical clock that drives every component.
//!
//! One `tick(now)` per wall-clock second advances every entity in a
//! fixed deterministic order: alarm evaluation first, then the override
//! cooldown, then the timers -- so an alarm firing and a session
//! completing in the same second are both observable, in that order.
//!
//! Missed ticks are dropped: the engine never infers elapsed wall time
//! after a host suspension. The hosting loop owns tick delivery.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alarm::AlarmScheduler;
use crate::config::Config;
use crate::duration::{format_clock, from_minutes};
use crate::error::EngineError;
use crate::events::Event;
use crate::focus::FocusSession;
use crate::gate::EmergencyOverride;
use crate::timer::{
    Phase, PomodoroConfig, PomodoroCycle, Stopwatch, TimerMachine, TimerStatus,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    focus: FocusSession,
    pomodoro: PomodoroCycle,
    stopwatch: Stopwatch,
    countdown: TimerMachine,
    alarms: AlarmScheduler,
    gate: EmergencyOverride,
}

impl Engine {
    /// Build the initial state from the persisted settings surface.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let mut alarms = AlarmScheduler::new();
        for a in &config.alarms {
            let id = alarms.add(a.hour, a.minute, a.label.clone(), a.days)?;
            if !a.enabled {
                alarms.toggle(id)?;
            }
        }
        Ok(Self {
            focus: FocusSession::new(
                from_minutes(u64::from(config.study.default_focus_minutes)),
                config.focus.blocked_sites.clone(),
            )?,
            pomodoro: PomodoroCycle::new(PomodoroConfig {
                work_secs: from_minutes(u64::from(config.schedule.work_minutes)),
                break_secs: from_minutes(u64::from(config.schedule.short_break_minutes)),
                long_break_secs: from_minutes(u64::from(config.schedule.long_break_minutes)),
                long_break_interval: config.schedule.work_sessions_before_long_break,
            })?,
            stopwatch: Stopwatch::new(),
            countdown: TimerMachine::new(
                from_minutes(u64::from(config.study.default_countdown_minutes)),
                Some("Countdown".into()),
            )?,
            alarms,
            gate: EmergencyOverride::new(config.focus.emergency_cooldown_secs),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn focus(&self) -> &FocusSession {
        &self.focus
    }

    pub fn pomodoro(&self) -> &PomodoroCycle {
        &self.pomodoro
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn countdown(&self) -> &TimerMachine {
        &self.countdown
    }

    pub fn alarms(&self) -> &AlarmScheduler {
        &self.alarms
    }

    pub fn gate(&self) -> &EmergencyOverride {
        &self.gate
    }

    // ── Commands ─────────────────────────────────────────────────────
    //
    // Focus commands go through the engine so the override gate stays in
    // sync with the session status; the other entities have no
    // cross-component coupling and are exposed mutably.

    pub fn configure_focus(
        &mut self,
        subject: &str,
        duration_secs: u64,
        notes: &str,
    ) -> Result<(), EngineError> {
        self.focus.configure(subject, duration_secs, notes)?;
        self.sync_gate();
        Ok(())
    }

    pub fn start_focus(&mut self) -> Result<Event, EngineError> {
        let event = self.focus.start()?;
        self.sync_gate();
        Ok(event)
    }

    pub fn pause_focus(&mut self) -> Result<Event, EngineError> {
        let event = self.focus.pause()?;
        self.sync_gate();
        Ok(event)
    }

    pub fn stop_focus(&mut self) -> Event {
        let event = self.focus.stop();
        self.sync_gate();
        event
    }

    pub fn block_site(&mut self, site: &str) -> bool {
        self.focus.block_site(site)
    }

    pub fn unblock_site(&mut self, site: &str) -> bool {
        self.focus.unblock_site(site)
    }

    pub fn trigger_override(&mut self) -> Result<Event, EngineError> {
        self.gate.trigger()
    }

    pub fn pomodoro_mut(&mut self) -> &mut PomodoroCycle {
        &mut self.pomodoro
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    pub fn countdown_mut(&mut self) -> &mut TimerMachine {
        &mut self.countdown
    }

    pub fn alarms_mut(&mut self) -> &mut AlarmScheduler {
        &mut self.alarms
    }

    /// Armed iff the focus session is running. Called on every focus
    /// status change and at the end of every tick.
    fn sync_gate(&mut self) {
        self.gate.set_armed(self.focus.is_active());
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// One advance of the shared 1-second clock. `now` is the local
    /// wall-clock time the alarms are matched against.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = self.alarms.evaluate(now);
        self.gate.tick();
        if let Some(event) = self.focus.tick() {
            events.push(event);
        }
        events.extend(self.pomodoro.tick());
        self.stopwatch.tick();
        if let Some(event) = self.countdown.tick() {
            events.push(event);
        }
        self.sync_gate();
        events.push(Event::Tick { at: Utc::now() });
        events
    }

    /// Atomic snapshot of every entity, taken between ticks.
    pub fn snapshot(&self, now: NaiveDateTime) -> EngineSnapshot {
        EngineSnapshot {
            at: now,
            focus: FocusSnapshot {
                subject: self.focus.subject().map(String::from),
                status: self.focus.status(),
                remaining_secs: self.focus.remaining_secs(),
                display: format_clock(self.focus.remaining_secs()),
                notes: self.focus.notes().to_string(),
                blocked_sites: self.focus.blocked_sites().to_vec(),
            },
            pomodoro: PomodoroSnapshot {
                phase: self.pomodoro.phase(),
                status: self.pomodoro.status(),
                remaining_secs: self.pomodoro.remaining_secs(),
                display: format_clock(self.pomodoro.remaining_secs()),
                completed_work_cycles: self.pomodoro.completed_work_cycles(),
            },
            stopwatch: StopwatchSnapshot {
                status: self.stopwatch.status(),
                elapsed_secs: self.stopwatch.elapsed_secs(),
                display: format_clock(self.stopwatch.elapsed_secs()),
            },
            countdown: CountdownSnapshot {
                status: self.countdown.status(),
                remaining_secs: self.countdown.remaining_secs(),
                display: format_clock(self.countdown.remaining_secs()),
            },
            alarms: self
                .alarms
                .iter()
                .map(|a| AlarmSnapshot {
                    id: a.id,
                    time: format!("{:02}:{:02}", a.hour, a.minute),
                    label: a.label.clone(),
                    enabled: a.enabled,
                    days: a.days_summary(),
                })
                .collect(),
            override_gate: OverrideSnapshot {
                armed: self.gate.is_armed(),
                cooldown_remaining_secs: self.gate.cooldown_remaining_secs(),
            },
        }
    }
}

/// Full engine state for the render layer, taken on a tick boundary.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub at: NaiveDateTime,
    pub focus: FocusSnapshot,
    pub pomodoro: PomodoroSnapshot,
    pub stopwatch: StopwatchSnapshot,
    pub countdown: CountdownSnapshot,
    pub alarms: Vec<AlarmSnapshot>,
    pub override_gate: OverrideSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct FocusSnapshot {
    pub subject: Option<String>,
    pub status: TimerStatus,
    pub remaining_secs: u64,
    pub display: String,
    pub notes: String,
    pub blocked_sites: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PomodoroSnapshot {
    pub phase: Phase,
    pub status: TimerStatus,
    pub remaining_secs: u64,
    pub display: String,
    pub completed_work_cycles: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopwatchSnapshot {
    pub status: TimerStatus,
    pub elapsed_secs: u64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountdownSnapshot {
    pub status: TimerStatus,
    pub remaining_secs: u64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlarmSnapshot {
    pub id: Uuid,
    pub time: String,
    pub label: String,
    pub enabled: bool,
    pub days: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverrideSnapshot {
    pub armed: bool,
    pub cooldown_remaining_secs: u32,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    // 2024-01-01 was a Monday.
    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn engine() -> Engine {
        Engine::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn from_config_seeds_alarms_and_durations() {
        let eng = engine();
        assert_eq!(eng.alarms().len(), 3);
        assert_eq!(eng.focus().duration_secs(), 25 * 60);
        assert_eq!(eng.countdown().duration_secs(), 30 * 60);
        assert_eq!(eng.pomodoro().config().long_break_secs, 15 * 60);
        // The disabled seed alarm stayed disabled.
        assert_eq!(eng.alarms().iter().filter(|a| a.enabled).count(), 2);
    }

    #[test]
    fn alarm_fires_before_timer_completion_in_the_same_second() {
        let mut eng = engine();
        eng.alarms_mut().add(9, 30, "check in", [true; 7]).unwrap();
        eng.countdown_mut().configure(1, None).unwrap();
        eng.countdown_mut().start().unwrap();

        let events = eng.tick(at(9, 30, 0));
        assert!(matches!(events[0], Event::AlarmFired { .. }));
        assert!(matches!(events[1], Event::TimerCompleted { .. }));
        assert!(matches!(events.last(), Some(Event::Tick { .. })));
    }

    #[test]
    fn gate_arms_with_focus_and_disarms_on_completion() {
        let mut eng = engine();
        assert!(eng.trigger_override().is_err());

        eng.configure_focus("Law", 2, "").unwrap();
        eng.start_focus().unwrap();
        assert!(eng.gate().is_armed());

        eng.tick(at(10, 0, 0));
        eng.tick(at(10, 0, 1));
        assert_eq!(eng.focus().status(), TimerStatus::Completed);
        assert!(!eng.gate().is_armed());
        assert_eq!(eng.trigger_override().unwrap_err(), EngineError::NotArmed);
    }

    #[test]
    fn override_cooldown_counts_down_with_the_shared_clock() {
        let mut config = Config::default();
        config.focus.emergency_cooldown_secs = 3;
        let mut eng = Engine::from_config(&config).unwrap();

        eng.configure_focus("Economics", 100, "").unwrap();
        eng.start_focus().unwrap();
        eng.trigger_override().unwrap();
        assert!(matches!(
            eng.trigger_override(),
            Err(EngineError::CooldownActive { .. })
        ));

        for s in 0..3 {
            eng.tick(at(10, 0, s));
        }
        assert!(eng.trigger_override().is_ok());
    }

    #[test]
    fn paused_focus_keeps_gate_disarmed() {
        let mut eng = engine();
        eng.configure_focus("Accounting", 100, "").unwrap();
        eng.start_focus().unwrap();
        eng.pause_focus().unwrap();
        assert!(!eng.gate().is_armed());
        // Toggle back to running re-arms.
        eng.pause_focus().unwrap();
        assert!(eng.gate().is_armed());
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut eng = engine();
        eng.stopwatch_mut().start().unwrap();
        eng.tick(at(8, 0, 0));

        let snap = eng.snapshot(at(8, 0, 0));
        assert_eq!(snap.stopwatch.elapsed_secs, 1);
        assert_eq!(snap.stopwatch.display, "00:01");
        assert_eq!(snap.focus.display, "25:00");
        assert_eq!(snap.alarms.len(), 3);
        assert!(!snap.override_gate.armed);
    }

    #[test]
    fn tick_always_ends_with_the_tick_event() {
        let mut eng = engine();
        let events = eng.tick(at(12, 0, 0));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::Tick { .. }));
    }
}
