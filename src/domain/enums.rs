use serde::{Deserialize, Serialize};

/// Runtime state of a timer
///
/// A timer is in exactly one state at any moment. `Completed` is entered
/// only by the tick loop when `remaining` hits zero, and left only by reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerState {
    /// Whether a toggle command may act on this state
    pub fn is_toggleable(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

/// Sort order for the timer list pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Status,
    Name,
    Duration,
}

impl SortKey {
    /// Cycle to the next sort key (for the 'o' keybinding)
    pub fn next(&self) -> Self {
        match self {
            Self::Status => Self::Name,
            Self::Name => Self::Duration,
            Self::Duration => Self::Status,
        }
    }

    /// Display label for the list pane title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Name => "name",
            Self::Duration => "duration",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTimer,
    Searching,
    ConfirmDeleteAll,
    ConfirmClearHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_state_is_toggleable() {
        assert!(TimerState::Idle.is_toggleable());
        assert!(TimerState::Running.is_toggleable());
        assert!(TimerState::Paused.is_toggleable());
        assert!(!TimerState::Completed.is_toggleable());
    }

    #[test]
    fn test_sort_key_cycles() {
        let mut key = SortKey::Status;
        key = key.next();
        assert_eq!(key, SortKey::Name);
        key = key.next();
        assert_eq!(key, SortKey::Duration);
        key = key.next();
        assert_eq!(key, SortKey::Status);
    }
}
