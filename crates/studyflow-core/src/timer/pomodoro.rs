//! Pomodoro cycle controller: work/break phase alternation on top of the
//! countdown machine.
//!
//! Breaks auto-start when a work session completes; the next work session
//! is never auto-started -- the user must consciously re-enter focused
//! work after a break.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::machine::{TimerMachine, TimerStatus};
use crate::error::EngineError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// Phase durations and the long-break policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroConfig {
    pub work_secs: u64,
    pub break_secs: u64,
    pub long_break_secs: u64,
    /// Every Nth completed work session is followed by the long break.
    pub long_break_interval: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            long_break_interval: 4,
        }
    }
}

/// Wraps a [`TimerMachine`] whose planned duration always equals the
/// duration configured for the current phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroCycle {
    config: PomodoroConfig,
    phase: Phase,
    completed_work_cycles: u32,
    inner: TimerMachine,
}

impl PomodoroCycle {
    pub fn new(mut config: PomodoroConfig) -> Result<Self, EngineError> {
        for secs in [config.work_secs, config.break_secs, config.long_break_secs] {
            if secs == 0 {
                return Err(EngineError::InvalidDuration(secs));
            }
        }
        // A zero interval would never select the long break.
        config.long_break_interval = config.long_break_interval.max(1);
        let inner = TimerMachine::new(config.work_secs, Some("Work".into()))?;
        Ok(Self {
            config,
            phase: Phase::Work,
            completed_work_cycles: 0,
            inner,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn status(&self) -> TimerStatus {
        self.inner.status()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.inner.remaining_secs()
    }

    pub fn timer(&self) -> &TimerMachine {
        &self.inner
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Event, EngineError> {
        self.inner.start()
    }

    pub fn pause(&mut self) -> Result<Event, EngineError> {
        self.inner.pause()
    }

    pub fn stop(&mut self) -> Event {
        self.inner.stop()
    }

    /// Back to a fresh cycle: Work phase, zero completed sessions, inner
    /// machine stopped on the work duration.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.completed_work_cycles = 0;
        self.inner.stop();
        self.inner.reprogram(self.config.work_secs, Some("Work".into()));
    }

    /// Advance the inner machine by one second, applying the phase
    /// alternation policy when it completes.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(completed) = self.inner.tick() else {
            return events;
        };
        events.push(completed);

        match self.phase {
            Phase::Work => {
                self.completed_work_cycles += 1;
                let long = self.completed_work_cycles % self.config.long_break_interval == 0;
                let (secs, label) = if long {
                    (self.config.long_break_secs, "Long Break")
                } else {
                    (self.config.break_secs, "Break")
                };
                self.phase = Phase::Break;
                self.inner.reprogram(secs, Some(label.into()));
                events.push(Event::PhaseChanged {
                    from: Phase::Work,
                    to: Phase::Break,
                    at: Utc::now(),
                });
                // Breaks start themselves.
                events.push(self.inner.begin());
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.inner.reprogram(self.config.work_secs, Some("Work".into()));
                events.push(Event::PhaseChanged {
                    from: Phase::Break,
                    to: Phase::Work,
                    at: Utc::now(),
                });
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(work: u64, short: u64, long: u64, interval: u32) -> PomodoroCycle {
        PomodoroCycle::new(PomodoroConfig {
            work_secs: work,
            break_secs: short,
            long_break_secs: long,
            long_break_interval: interval,
        })
        .unwrap()
    }

    fn run_out(cycle: &mut PomodoroCycle) -> Vec<Event> {
        let mut events = Vec::new();
        while cycle.status() == TimerStatus::Running {
            events.extend(cycle.tick());
        }
        events
    }

    #[test]
    fn rejects_zero_durations() {
        assert!(PomodoroCycle::new(PomodoroConfig {
            work_secs: 0,
            ..PomodoroConfig::default()
        })
        .is_err());
    }

    #[test]
    fn work_completion_auto_starts_break() {
        let mut pomo = cycle(3, 2, 10, 4);
        pomo.start().unwrap();
        pomo.tick();
        pomo.tick();
        let events = pomo.tick();

        assert_eq!(pomo.phase(), Phase::Break);
        assert_eq!(pomo.completed_work_cycles(), 1);
        assert_eq!(pomo.status(), TimerStatus::Running);
        assert_eq!(pomo.remaining_secs(), 2);

        assert!(matches!(events[0], Event::TimerCompleted { .. }));
        assert!(matches!(
            events[1],
            Event::PhaseChanged { from: Phase::Work, to: Phase::Break, .. }
        ));
        assert!(matches!(events[2], Event::TimerStarted { .. }));
    }

    #[test]
    fn break_completion_leaves_work_idle() {
        let mut pomo = cycle(3, 2, 10, 4);
        pomo.start().unwrap();
        run_out(&mut pomo); // work + auto-started break

        assert_eq!(pomo.phase(), Phase::Work);
        assert_eq!(pomo.status(), TimerStatus::Idle);
        assert_eq!(pomo.remaining_secs(), 3);
    }

    #[test]
    fn long_break_every_fourth_cycle() {
        let mut pomo = cycle(2, 5, 9, 4);
        for expected_break in [5u64, 5, 5, 9, 5] {
            pomo.start().unwrap();
            // Run the work session down.
            pomo.tick();
            let events = pomo.tick();
            assert!(matches!(
                events.last(),
                Some(Event::TimerStarted { duration_secs, .. }) if *duration_secs == expected_break
            ));
            // Run the break down.
            run_out(&mut pomo);
        }
        assert_eq!(pomo.completed_work_cycles(), 5);
    }

    #[test]
    fn reset_zeroes_cycles_and_returns_to_work() {
        let mut pomo = cycle(2, 2, 4, 2);
        pomo.start().unwrap();
        run_out(&mut pomo);
        assert_eq!(pomo.completed_work_cycles(), 1);

        pomo.reset();
        assert_eq!(pomo.phase(), Phase::Work);
        assert_eq!(pomo.completed_work_cycles(), 0);
        assert_eq!(pomo.status(), TimerStatus::Idle);
        assert_eq!(pomo.remaining_secs(), 2);
    }

    #[test]
    fn inner_duration_tracks_phase() {
        let mut pomo = cycle(4, 2, 6, 2);
        assert_eq!(pomo.timer().duration_secs(), 4);
        pomo.start().unwrap();
        for _ in 0..4 {
            pomo.tick();
        }
        assert_eq!(pomo.phase(), Phase::Break);
        assert_eq!(pomo.timer().duration_secs(), 2);
    }
}
