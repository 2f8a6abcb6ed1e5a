//! Seconds/clock-face arithmetic shared by every timer surface.

/// Split a second count into (hours, minutes, seconds).
pub fn split_hms(total_secs: u64) -> (u64, u64, u64) {
    (
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
    )
}

/// Format as `MM:SS`, switching to `HH:MM:SS` once a full hour is reached.
pub fn format_clock(total_secs: u64) -> String {
    let (h, m, s) = split_hms(total_secs);
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Format as `HH:MM:SS` regardless of magnitude.
pub fn format_hms(total_secs: u64) -> String {
    let (h, m, s) = split_hms(total_secs);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Whole minutes to seconds, saturating on overflow.
pub fn from_minutes(minutes: u64) -> u64 {
    minutes.saturating_mul(60)
}
