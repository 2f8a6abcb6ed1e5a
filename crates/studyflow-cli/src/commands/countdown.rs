use chrono::Local;
use clap::Subcommand;
use studyflow_core::{duration::from_minutes, Config, Engine};

use crate::state;

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Set the countdown duration
    Set {
        #[arg(long, default_value_t = 30)]
        minutes: u64,
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
    /// Start or resume the countdown
    Start,
    /// Toggle pause
    Pause,
    /// Stop and reset to the configured duration
    Stop,
    /// Print the countdown snapshot as JSON
    Status,
}

pub fn run(action: CountdownAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    match action {
        CountdownAction::Set { minutes, seconds } => {
            let total = from_minutes(minutes).saturating_add(seconds);
            engine
                .countdown_mut()
                .configure(total, Some("Countdown".into()))?;
            print_countdown(&engine)?;
        }
        CountdownAction::Start => {
            let event = engine.countdown_mut().start()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        CountdownAction::Pause => {
            let event = engine.countdown_mut().pause()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        CountdownAction::Stop => {
            let event = engine.countdown_mut().stop();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        CountdownAction::Status => print_countdown(&engine)?,
    }

    state::save_engine(&engine)?;
    Ok(())
}

fn print_countdown(engine: &Engine) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = engine.snapshot(Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&snapshot.countdown)?);
    Ok(())
}
