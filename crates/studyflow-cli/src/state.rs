//! Engine state persisted between CLI invocations.
//!
//! The engine serializes to a JSON file beside the configuration; each
//! command loads it, applies one mutation, and saves it back. A corrupt
//! or missing file falls back to a fresh engine built from config.

use std::path::PathBuf;

use studyflow_core::{config::data_dir, Config, Engine};

const STATE_FILE: &str = "engine.json";

pub fn state_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join(STATE_FILE))
}

pub fn load_engine(config: &Config) -> Result<Engine, Box<dyn std::error::Error>> {
    if let Ok(json) = std::fs::read_to_string(state_path()?) {
        if let Ok(engine) = serde_json::from_str::<Engine>(&json) {
            return Ok(engine);
        }
    }
    Ok(Engine::from_config(config)?)
}

pub fn save_engine(engine: &Engine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    std::fs::write(state_path()?, json)?;
    Ok(())
}
