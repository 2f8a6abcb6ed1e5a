//! Integration tests driving the whole engine through realistic
//! study-session scenarios.

use chrono::{NaiveDate, NaiveDateTime};
use studyflow_core::{
    Config, Engine, Event, Phase, PomodoroConfig, PomodoroCycle, TimerStatus,
};

// 2024-01-01 was a Monday.
fn monday(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

#[test]
fn focus_session_runs_25_minutes_to_completion() {
    let mut engine = Engine::from_config(&Config::default()).unwrap();
    engine.configure_focus("Accounting", 25 * 60, "").unwrap();
    engine.start_focus().unwrap();

    let mut completions = 0;
    for i in 0..1500u32 {
        let now = monday(10, i / 60, i % 60);
        for event in engine.tick(now) {
            if matches!(event, Event::TimerCompleted { ref label, .. } if label.as_deref() == Some("Accounting"))
            {
                completions += 1;
            }
        }
    }

    assert_eq!(engine.focus().status(), TimerStatus::Completed);
    assert_eq!(engine.focus().remaining_secs(), 0);
    assert_eq!(completions, 1);
}

#[test]
fn fourth_pomodoro_break_is_the_long_one() {
    // work=1500s, break=300s, longBreak=900s, interval=4.
    let mut pomodoro = PomodoroCycle::new(PomodoroConfig {
        work_secs: 1500,
        break_secs: 300,
        long_break_secs: 900,
        long_break_interval: 4,
    })
    .unwrap();

    let mut break_durations = Vec::new();
    for _ in 0..4 {
        pomodoro.start().unwrap();
        // Work runs down; the break auto-starts.
        for _ in 0..1500 {
            pomodoro.tick();
        }
        assert_eq!(pomodoro.phase(), Phase::Break);
        break_durations.push(pomodoro.timer().duration_secs());
        // Run the break down; the next work session waits for the user.
        while pomodoro.status() == TimerStatus::Running {
            pomodoro.tick();
        }
        assert_eq!(pomodoro.phase(), Phase::Work);
        assert_eq!(pomodoro.status(), TimerStatus::Idle);
    }

    assert_eq!(break_durations, vec![300, 300, 300, 900]);
    assert_eq!(pomodoro.completed_work_cycles(), 4);
}

#[test]
fn alarm_is_idempotent_across_a_minute_of_engine_ticks() {
    let mut engine = Engine::from_config(&Config::default()).unwrap();
    let id = engine
        .alarms_mut()
        .add(14, 30, "Afternoon review", [true; 7])
        .unwrap();

    let mut fired = 0;
    for second in 0..60 {
        for event in engine.tick(monday(14, 30, second)) {
            if matches!(event, Event::AlarmFired { alarm_id, .. } if alarm_id == id) {
                fired += 1;
            }
        }
    }
    assert_eq!(fired, 1);

    // Next day, same minute: fires again without re-adding.
    let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let refired = engine
        .tick(tuesday)
        .iter()
        .filter(|e| matches!(e, Event::AlarmFired { alarm_id, .. } if *alarm_id == id))
        .count();
    assert_eq!(refired, 1);
}

#[test]
fn override_lifecycle_through_a_focus_session() {
    let mut config = Config::default();
    config.focus.emergency_cooldown_secs = 10;
    let mut engine = Engine::from_config(&config).unwrap();

    // Not armed before a session starts.
    assert!(engine.trigger_override().is_err());

    engine.configure_focus("Law", 3600, "case digests").unwrap();
    engine.start_focus().unwrap();

    engine.trigger_override().unwrap();
    assert!(engine.trigger_override().is_err());

    // The shared clock drains the cooldown while the session runs.
    for second in 0..10 {
        engine.tick(monday(9, 0, second));
    }
    assert_eq!(engine.gate().cooldown_remaining_secs(), 0);
    assert!(engine.trigger_override().is_ok());

    // Stopping the session disarms the gate.
    engine.stop_focus();
    assert!(engine.trigger_override().is_err());
}

#[test]
fn all_entities_advance_from_one_clock() {
    let mut engine = Engine::from_config(&Config::default()).unwrap();
    engine.configure_focus("Economics", 120, "").unwrap();
    engine.start_focus().unwrap();
    engine.pomodoro_mut().start().unwrap();
    engine.stopwatch_mut().start().unwrap();
    engine.countdown_mut().configure(60, None).unwrap();
    engine.countdown_mut().start().unwrap();

    for second in 0..30 {
        engine.tick(monday(11, 0, second));
    }

    let snap = engine.snapshot(monday(11, 0, 30));
    assert_eq!(snap.focus.remaining_secs, 90);
    assert_eq!(snap.pomodoro.remaining_secs, 25 * 60 - 30);
    assert_eq!(snap.stopwatch.elapsed_secs, 30);
    assert_eq!(snap.countdown.remaining_secs, 30);
}

#[test]
fn engine_state_survives_a_serde_roundtrip() {
    let mut engine = Engine::from_config(&Config::default()).unwrap();
    engine.configure_focus("Accounting", 600, "ratios").unwrap();
    engine.start_focus().unwrap();
    for second in 0..5 {
        engine.tick(monday(16, 0, second));
    }

    let json = serde_json::to_string(&engine).unwrap();
    let restored: Engine = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.focus().remaining_secs(), 595);
    assert_eq!(restored.focus().status(), TimerStatus::Running);
    assert_eq!(restored.focus().subject(), Some("Accounting"));
    assert_eq!(restored.alarms().len(), engine.alarms().len());
}
