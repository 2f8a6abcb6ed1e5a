//! The live clock loop: delivers one engine tick per wall-clock second.
//!
//! Fired events stream to stdout as JSON lines; operational logging goes
//! to stderr. Missed intervals are not replayed -- the engine's policy is
//! to drop ticks the host never delivered.

use std::time::Duration;

use chrono::Local;
use studyflow_core::{Config, Event};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    info!("clock loop started (one tick per second); press Ctrl-C to stop");

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately; consume it so the
    // first engine tick lands a full second after startup.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let events = engine.tick(Local::now().naive_local());
                for event in &events {
                    match event {
                        Event::Tick { .. } => debug!("tick"),
                        other => println!("{}", serde_json::to_string(other)?),
                    }
                }
                state::save_engine(&engine)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping clock loop");
                state::save_engine(&engine)?;
                return Ok(());
            }
        }
    }
}
