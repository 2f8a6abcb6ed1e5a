//! # Studyflow Core Library
//!
//! This library provides the core logic for Studyflow, a personal
//! study-session time manager. The CLI binary is a thin layer over this
//! crate; the library itself performs no I/O besides the configuration
//! file and emits no side effects -- every observable change is a typed
//! [`Event`] for collaborators to consume.
//!
//! ## Architecture
//!
//! - **Timer machine**: one four-state countdown machine
//!   ([`TimerMachine`]) backs the focus session, the countdown timer and
//!   the inner timer of the Pomodoro cycle. The caller drives it by
//!   invoking `tick()` once per wall-clock second.
//! - **Engine**: [`Engine`] owns one of each entity and advances them all
//!   from a single `tick(now)` call in a fixed order.
//! - **Alarm scheduler**: recurring day-of-week alarms matched against
//!   wall-clock time, de-duplicated per calendar minute.
//! - **Configuration**: TOML settings at `~/.config/studyflow/config.toml`.
//!
//! ## Key Components
//!
//! - [`TimerMachine`]: generic countdown state machine
//! - [`PomodoroCycle`]: work/break phase alternation policy
//! - [`AlarmScheduler`]: recurring alarm evaluation
//! - [`EmergencyOverride`]: cooldown-gated focus-session escape hatch
//! - [`Config`]: application configuration management

pub mod alarm;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod events;
pub mod focus;
pub mod gate;
pub mod timer;

pub use alarm::{Alarm, AlarmScheduler};
pub use config::Config;
pub use engine::{Engine, EngineSnapshot};
pub use error::{ConfigError, EngineError};
pub use events::Event;
pub use focus::FocusSession;
pub use gate::EmergencyOverride;
pub use timer::{Phase, PomodoroConfig, PomodoroCycle, Stopwatch, TimerMachine, TimerStatus};
