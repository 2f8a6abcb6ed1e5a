pub mod alarm;
pub mod config;
pub mod countdown;
pub mod focus;
pub mod pomodoro;
pub mod stopwatch;
pub mod watch;

use chrono::Local;
use studyflow_core::Config;

/// Print the full engine snapshot as pretty JSON.
pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = crate::state::load_engine(&config)?;
    let snapshot = engine.snapshot(Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
