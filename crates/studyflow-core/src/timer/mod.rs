mod machine;
mod pomodoro;
mod stopwatch;

pub use machine::{TimerConfig, TimerMachine, TimerStatus};
pub use pomodoro::{Phase, PomodoroConfig, PomodoroCycle};
pub use stopwatch::Stopwatch;
