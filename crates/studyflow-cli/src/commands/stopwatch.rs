use chrono::Local;
use clap::Subcommand;
use studyflow_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start or resume counting
    Start,
    /// Toggle pause
    Pause,
    /// Halt counting, keeping the elapsed time
    Stop,
    /// Halt counting and zero the elapsed time
    Reset,
    /// Print the stopwatch snapshot as JSON
    Status,
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    match action {
        StopwatchAction::Start => engine.stopwatch_mut().start()?,
        StopwatchAction::Pause => engine.stopwatch_mut().pause()?,
        StopwatchAction::Stop => engine.stopwatch_mut().stop(),
        StopwatchAction::Reset => engine.stopwatch_mut().reset(),
        StopwatchAction::Status => {}
    }

    let snapshot = engine.snapshot(Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&snapshot.stopwatch)?);

    state::save_engine(&engine)?;
    Ok(())
}
