pub mod enums;
pub mod timer;
pub mod views;

pub use enums::{SortKey, TimerState, UiMode};
pub use timer::{format_clock, CompletedTimer, CreateTimerInput, Timer};
pub use views::{status_badge, visible_timers};
