use chrono::Local;
use clap::Subcommand;
use studyflow_core::{duration::from_minutes, Config};

use crate::state;

#[derive(Subcommand)]
pub enum FocusAction {
    /// Configure the next session
    Configure {
        /// Subject to study
        subject: String,
        /// Session length in minutes
        #[arg(long, default_value_t = 25)]
        minutes: u64,
        /// Free-form session notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Start or resume the session
    Start,
    /// Toggle pause
    Pause,
    /// Stop and reset the session
    Stop,
    /// Trigger the emergency override (cooldown-gated)
    Override,
    /// Add a site to the block-list
    Block { site: String },
    /// Remove a site from the block-list
    Unblock { site: String },
    /// Print the session snapshot as JSON
    Status,
}

pub fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    match action {
        FocusAction::Configure {
            subject,
            minutes,
            notes,
        } => {
            engine.configure_focus(&subject, from_minutes(minutes), &notes)?;
            print_session(&engine)?;
        }
        FocusAction::Start => {
            let event = engine.start_focus()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FocusAction::Pause => {
            let event = engine.pause_focus()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FocusAction::Stop => {
            let event = engine.stop_focus();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FocusAction::Override => {
            let event = engine.trigger_override()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        FocusAction::Block { site } => {
            let added = engine.block_site(&site);
            println!(
                "{}",
                serde_json::json!({ "site": site.trim(), "added": added })
            );
        }
        FocusAction::Unblock { site } => {
            let removed = engine.unblock_site(&site);
            println!(
                "{}",
                serde_json::json!({ "site": site.trim(), "removed": removed })
            );
        }
        FocusAction::Status => print_session(&engine)?,
    }

    state::save_engine(&engine)?;
    Ok(())
}

fn print_session(engine: &studyflow_core::Engine) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = engine.snapshot(Local::now().naive_local());
    println!("{}", serde_json::to_string_pretty(&snapshot.focus)?);
    Ok(())
}
