use chrono::Local;
use clap::Subcommand;
use studyflow_core::Config;

use crate::state;

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start or resume the current phase
    Start,
    /// Toggle pause
    Pause,
    /// Stop the current phase (keeps the cycle count)
    Stop,
    /// Back to a fresh cycle: work phase, zero completed sessions
    Reset,
    /// Print the cycle snapshot as JSON
    Status,
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    match action {
        PomodoroAction::Start => {
            let event = engine.pomodoro_mut().start()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PomodoroAction::Pause => {
            let event = engine.pomodoro_mut().pause()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PomodoroAction::Stop => {
            let event = engine.pomodoro_mut().stop();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        PomodoroAction::Reset => {
            engine.pomodoro_mut().reset();
            print_cycle(&engine)?;
        }
        PomodoroAction::Status => print_cycle(&engine)?,
    }

    state::save_engine(&engine)?;
    Ok(())
}

fn print_cycle(engine: &studyflow_core::Engine) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = engine.snapshot(Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&snapshot.pomodoro)?);
    Ok(())
}
