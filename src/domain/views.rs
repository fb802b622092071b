use super::enums::{SortKey, TimerState};
use super::timer::Timer;

/// Rank used when sorting the list by status (active first)
fn status_rank(state: TimerState) -> u8 {
    match state {
        TimerState::Running => 0,
        TimerState::Paused => 1,
        TimerState::Idle => 2,
        TimerState::Completed => 3,
    }
}

/// Compute the visible rows of the timer list
///
/// Returns indices into `timers`, filtered by the search query (substring
/// match on the name, case-insensitive) and ordered by the sort key. The
/// engine's list order is never touched; this is a pure view.
pub fn visible_timers(timers: &[Timer], sort: SortKey, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();

    let mut rows: Vec<usize> = timers
        .iter()
        .enumerate()
        .filter(|(_, t)| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect();

    match sort {
        SortKey::Status => {
            rows.sort_by(|&a, &b| {
                status_rank(timers[a].state)
                    .cmp(&status_rank(timers[b].state))
                    .then_with(|| timers[a].name.to_lowercase().cmp(&timers[b].name.to_lowercase()))
            });
        }
        SortKey::Name => {
            rows.sort_by(|&a, &b| timers[a].name.to_lowercase().cmp(&timers[b].name.to_lowercase()));
        }
        SortKey::Duration => {
            rows.sort_by(|&a, &b| {
                timers[a]
                    .duration
                    .cmp(&timers[b].duration)
                    .then_with(|| timers[a].name.to_lowercase().cmp(&timers[b].name.to_lowercase()))
            });
        }
    }

    rows
}

/// Get status badge text for a timer
pub fn status_badge(timer: &Timer) -> &'static str {
    match timer.state {
        TimerState::Running => "⏱ RUNNING",
        TimerState::Paused => "⏸ PAUSED",
        TimerState::Idle => "· IDLE",
        TimerState::Completed => "✓ DONE",
    }
}
