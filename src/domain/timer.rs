use super::enums::TimerState;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Form input for creating a timer
///
/// The duration is entered as hours/minutes/seconds fields and collapsed to
/// whole seconds at creation time.
#[derive(Debug, Clone, Default)]
pub struct CreateTimerInput {
    pub name: String,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub description: Option<String>,
    pub color: String,
    pub alert_percentage: Option<u8>,
}

impl CreateTimerInput {
    /// Total duration in whole seconds
    ///
    /// Computed in u64 so arbitrary form input cannot overflow; create
    /// validation rejects anything that does not fit a timer's u32 duration.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

/// A countdown timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    /// Unique ID, assigned at creation and never reused
    pub id: Uuid,
    /// Display name (non-empty)
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Total duration in seconds, immutable after creation
    pub duration: u32,
    /// Seconds left, always in `[0, duration]`
    pub remaining: u32,
    /// Opaque display tag, rendered by the UI only
    pub color: String,
    pub state: TimerState,
    /// Elapsed-percentage threshold (0-100) for a one-time progress alert
    #[serde(default)]
    pub alert_percentage: Option<u8>,
    /// Latch set once the progress alert has fired; cleared by reset
    #[serde(default)]
    pub alert_fired: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}

impl Timer {
    /// Create a new idle timer from validated form input
    pub fn new(input: CreateTimerInput) -> Self {
        let duration = input.total_seconds() as u32;
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            description: input.description,
            duration,
            remaining: duration,
            color: input.color,
            state: TimerState::Idle,
            alert_percentage: input.alert_percentage,
            alert_fired: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Percentage of the duration elapsed so far, floored to a whole number
    pub fn percentage_completed(&self) -> u8 {
        if self.duration == 0 {
            return 100;
        }
        let elapsed = (self.duration - self.remaining) as u64;
        (elapsed * 100 / self.duration as u64) as u8
    }

    /// Start running (Idle or Paused only)
    pub fn start(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Paused) && self.remaining > 0 {
            self.state = TimerState::Running;
        }
    }

    /// Pause a running timer
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Reset to idle from any state, restoring the full duration
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.state = TimerState::Idle;
        self.completed_at = None;
        self.alert_fired = false;
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Repair a record loaded from disk so the invariants hold
    ///
    /// Clamps `remaining` into `[0, duration]` and re-derives the state where
    /// the stored one contradicts `remaining`.
    pub fn normalize(&mut self) {
        if self.remaining > self.duration {
            self.remaining = self.duration;
        }
        if self.remaining == 0 {
            self.state = TimerState::Completed;
        } else if self.state == TimerState::Completed {
            self.state = TimerState::Idle;
        }
    }

    /// Coerce a persisted Running timer to Paused (for startup)
    ///
    /// There is no background execution while the process is down, so the
    /// timer resumes from the last persisted `remaining`.
    pub fn coerce_running_to_paused(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Format remaining time for the list pane
    pub fn remaining_formatted(&self) -> String {
        format_clock(self.remaining)
    }

    /// Format total duration for the list pane
    pub fn duration_formatted(&self) -> String {
        format_clock(self.duration)
    }
}

/// An immutable snapshot of a completed timer, kept in the history log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTimer {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: u32,
    pub color: String,
    pub completed_at: DateTime<Local>,
}

impl CompletedTimer {
    /// Snapshot a timer that just ran to zero
    pub fn snapshot(timer: &Timer, completed_at: DateTime<Local>) -> Self {
        Self {
            id: timer.id,
            name: timer.name.clone(),
            description: timer.description.clone(),
            duration: timer.duration,
            color: timer.color.clone(),
            completed_at,
        }
    }
}

/// Format seconds as "M:SS" or "H:MM:SS"
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea_input() -> CreateTimerInput {
        CreateTimerInput {
            name: "Tea".to_string(),
            hours: 0,
            minutes: 0,
            seconds: 5,
            description: None,
            color: "green".to_string(),
            alert_percentage: Some(40),
        }
    }

    #[test]
    fn test_total_seconds() {
        let input = CreateTimerInput {
            hours: 1,
            minutes: 30,
            seconds: 15,
            ..Default::default()
        };
        assert_eq!(input.total_seconds(), 5415);
    }

    #[test]
    fn test_total_seconds_huge_fields_do_not_overflow() {
        let input = CreateTimerInput {
            hours: 2_000_000,
            minutes: u32::MAX,
            seconds: u32::MAX,
            ..Default::default()
        };
        assert_eq!(
            input.total_seconds(),
            2_000_000u64 * 3600 + u64::from(u32::MAX) * 60 + u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_new_timer_is_idle() {
        let timer = Timer::new(tea_input());
        assert_eq!(timer.state, TimerState::Idle);
        assert_eq!(timer.duration, 5);
        assert_eq!(timer.remaining, 5);
        assert_eq!(timer.alert_percentage, Some(40));
        assert!(!timer.alert_fired);
        assert!(timer.completed_at.is_none());
    }

    #[test]
    fn test_new_timer_trims_name() {
        let mut input = tea_input();
        input.name = "  Tea  ".to_string();
        assert_eq!(Timer::new(input).name, "Tea");
    }

    #[test]
    fn test_percentage_completed() {
        let mut timer = Timer::new(tea_input());
        assert_eq!(timer.percentage_completed(), 0);
        timer.remaining = 3;
        assert_eq!(timer.percentage_completed(), 40);
        timer.remaining = 0;
        assert_eq!(timer.percentage_completed(), 100);
    }

    #[test]
    fn test_percentage_completed_floors() {
        let mut timer = Timer::new(CreateTimerInput {
            seconds: 3,
            name: "x".to_string(),
            ..Default::default()
        });
        timer.remaining = 2;
        assert_eq!(timer.percentage_completed(), 33);
        timer.remaining = 1;
        assert_eq!(timer.percentage_completed(), 66);
    }

    #[test]
    fn test_start_pause_transitions() {
        let mut timer = Timer::new(tea_input());

        timer.start();
        assert_eq!(timer.state, TimerState::Running);

        timer.pause();
        assert_eq!(timer.state, TimerState::Paused);

        timer.start();
        assert_eq!(timer.state, TimerState::Running);
    }

    #[test]
    fn test_start_completed_is_noop() {
        let mut timer = Timer::new(tea_input());
        timer.remaining = 0;
        timer.state = TimerState::Completed;

        timer.start();
        assert_eq!(timer.state, TimerState::Completed);
    }

    #[test]
    fn test_reset_restores_idle() {
        let mut timer = Timer::new(tea_input());
        timer.start();
        timer.remaining = 1;
        timer.alert_fired = true;

        timer.reset();
        assert_eq!(timer.state, TimerState::Idle);
        assert_eq!(timer.remaining, timer.duration);
        assert!(!timer.alert_fired);
        assert!(timer.completed_at.is_none());
    }

    #[test]
    fn test_normalize_clamps_remaining() {
        let mut timer = Timer::new(tea_input());
        timer.remaining = 99;
        timer.normalize();
        assert_eq!(timer.remaining, 5);
        assert_eq!(timer.state, TimerState::Idle);
    }

    #[test]
    fn test_normalize_derives_completed() {
        let mut timer = Timer::new(tea_input());
        timer.remaining = 0;
        timer.normalize();
        assert_eq!(timer.state, TimerState::Completed);
    }

    #[test]
    fn test_coerce_running_to_paused() {
        let mut timer = Timer::new(tea_input());
        timer.start();
        timer.coerce_running_to_paused();
        assert_eq!(timer.state, TimerState::Paused);

        // Idle timers are untouched
        let mut idle = Timer::new(tea_input());
        idle.coerce_running_to_paused();
        assert_eq!(idle.state, TimerState::Idle);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(5415), "1:30:15");
    }

    #[test]
    fn test_completed_snapshot() {
        let timer = Timer::new(tea_input());
        let now = Local::now();
        let snap = CompletedTimer::snapshot(&timer, now);
        assert_eq!(snap.id, timer.id);
        assert_eq!(snap.name, "Tea");
        assert_eq!(snap.duration, 5);
        assert_eq!(snap.completed_at, now);
    }
}
