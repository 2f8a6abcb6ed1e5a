use chrono::Local;
use clap::Subcommand;
use studyflow_core::Config;
use uuid::Uuid;

use crate::state;

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Add a recurring alarm
    Add {
        /// Time of day as HH:MM
        time: String,
        /// Alarm label
        label: String,
        /// "daily", "weekdays", or comma-separated day names ("mon,wed,fri")
        #[arg(long, default_value = "mon,tue,wed,thu,fri,sat")]
        days: String,
    },
    /// Remove an alarm by id
    Remove { id: Uuid },
    /// Enable or disable an alarm
    Toggle { id: Uuid },
    /// List alarms as JSON
    List,
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = state::load_engine(&config)?;

    match action {
        AlarmAction::Add { time, label, days } => {
            let (hour, minute) = parse_time(&time)?;
            let days = parse_days(&days)?;
            let id = engine.alarms_mut().add(hour, minute, label, days)?;
            println!("{}", serde_json::json!({ "added": id }));
        }
        AlarmAction::Remove { id } => {
            engine.alarms_mut().remove(id)?;
            println!("{}", serde_json::json!({ "removed": id }));
        }
        AlarmAction::Toggle { id } => {
            let enabled = engine.alarms_mut().toggle(id)?;
            println!("{}", serde_json::json!({ "id": id, "enabled": enabled }));
        }
        AlarmAction::List => {
            let snapshot = engine.snapshot(Local::now().naive_local());
            println!("{}", serde_json::to_string_pretty(&snapshot.alarms)?);
        }
    }

    state::save_engine(&engine)?;
    Ok(())
}

fn parse_time(raw: &str) -> Result<(u8, u8), Box<dyn std::error::Error>> {
    let (h, m) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{raw}'"))?;
    Ok((h.parse()?, m.parse()?))
}

fn parse_days(raw: &str) -> Result<[bool; 7], Box<dyn std::error::Error>> {
    match raw.trim().to_lowercase().as_str() {
        "daily" => Ok([true; 7]),
        "weekdays" => Ok([true, true, true, true, true, false, false]),
        spec => {
            let names = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];
            let mut days = [false; 7];
            for part in spec.split(',') {
                let part = part.trim();
                let idx = names
                    .iter()
                    .position(|n| *n == part)
                    .ok_or_else(|| format!("unknown day name '{part}'"))?;
                days[idx] = true;
            }
            Ok(days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_lists() {
        assert_eq!(parse_days("daily").unwrap(), [true; 7]);
        assert_eq!(
            parse_days("weekdays").unwrap(),
            [true, true, true, true, true, false, false]
        );
        assert_eq!(
            parse_days("mon,wed,sun").unwrap(),
            [true, false, true, false, false, false, true]
        );
        assert!(parse_days("blursday").is_err());
    }

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_time("06:30").unwrap(), (6, 30));
        assert!(parse_time("630").is_err());
    }
}
