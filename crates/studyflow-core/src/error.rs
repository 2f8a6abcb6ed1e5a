//! Error types for studyflow-core.
//!
//! Every engine command either succeeds and mutates state, or fails with
//! one of these and leaves state unchanged. All errors are recoverable;
//! nothing here aborts the process.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::timer::TimerStatus;

/// Engine command errors.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    /// Configured duration is zero.
    #[error("invalid duration: {0} seconds (must be positive)")]
    InvalidDuration(u64),

    /// Command is not valid in the current machine status.
    #[error("'{command}' is not valid while the timer is {status:?}")]
    InvalidTransition {
        command: &'static str,
        status: TimerStatus,
    },

    /// Alarm hour/minute out of range.
    #[error("invalid time of day: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u8, minute: u8 },

    /// Operation on an unknown alarm id.
    #[error("no alarm with id {0}")]
    NotFound(Uuid),

    /// Override triggered while no focus session is running.
    #[error("override is not armed (no focus session running)")]
    NotArmed,

    /// Override triggered while its cooldown is still counting down.
    #[error("override cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u32 },

    /// A focus session was configured or started without a subject.
    #[error("a focus session needs a subject")]
    EmptySubject,
}

/// Configuration surface errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("cannot parse '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("cannot determine data directory: {0}")]
    DataDir(String),
}

/// Result type alias for engine operations.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
