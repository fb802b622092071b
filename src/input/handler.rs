use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Handle keyboard input events
///
/// Returns `true` when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTimer => handle_input_form_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::ConfirmDeleteAll | UiMode::ConfirmClearHistory => {
            handle_confirm_mode(app, key, now)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Toggle run/pause
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected(now);
            Ok(false)
        }

        // Add a timer
        KeyCode::Char('a') => {
            app.start_add_timer();
            Ok(false)
        }

        // Reset selected / reset all visible
        KeyCode::Char('r') => {
            app.reset_selected(now);
            Ok(false)
        }
        KeyCode::Char('R') => {
            app.reset_all_visible(now);
            Ok(false)
        }

        // Delete selected
        KeyCode::Char('d') | KeyCode::Delete => {
            app.delete_selected(now);
            Ok(false)
        }

        // Bulk start/pause over the visible list
        KeyCode::Char('s') => {
            app.start_all_visible(now);
            Ok(false)
        }
        KeyCode::Char('p') => {
            app.pause_all_visible(now);
            Ok(false)
        }

        // Clear completed timers / clear history (confirmed)
        KeyCode::Char('c') => {
            app.clear_completed(now);
            Ok(false)
        }
        KeyCode::Char('C') => {
            app.ui_mode = UiMode::ConfirmClearHistory;
            Ok(false)
        }

        // Delete all timers (confirmed)
        KeyCode::Char('D') => {
            app.ui_mode = UiMode::ConfirmDeleteAll;
            Ok(false)
        }

        // Search and sort
        KeyCode::Char('/') => {
            app.start_search();
            Ok(false)
        }
        KeyCode::Char('o') => {
            app.cycle_sort();
            Ok(false)
        }

        // History pane
        KeyCode::Char('h') => {
            app.toggle_show_history();
            Ok(false)
        }
        KeyCode::Char('[') => {
            app.scroll_history_up();
            Ok(false)
        }
        KeyCode::Char(']') => {
            app.scroll_history_down();
            Ok(false)
        }

        // Dismiss status line / active search filter
        KeyCode::Esc => {
            if app.status.take().is_none() {
                app.clear_search();
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the create form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Tab => app.form_next_field(),
        KeyCode::Left => app.form_prev_color(),
        KeyCode::Right => app.form_next_color(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing a search query
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        // Keep the filter and return to normal mode
        KeyCode::Enter => app.ui_mode = UiMode::Normal,
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in a confirm prompt
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match app.ui_mode {
            UiMode::ConfirmDeleteAll => app.delete_all(now),
            UiMode::ConfirmClearHistory => app.clear_history(),
            _ => {}
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.ui_mode = UiMode::Normal;
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateTimerInput;
    use crate::engine::TimerEngine;
    use crate::persistence::TimerStore;
    use crossterm::event::KeyModifiers;
    use tempfile::tempdir;

    fn test_app() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let engine = TimerEngine::load(TimerStore::new(dir.path())).unwrap();
        (AppState::new(engine), dir)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now()).unwrap()
    }

    #[test]
    fn test_q_quits_in_normal_mode() {
        let (mut app, _dir) = test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_a_opens_form_and_esc_closes_it() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingTimer);
        assert!(app.input_form.is_some());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_delete_all_requires_confirmation() {
        let (mut app, _dir) = test_app();
        app.engine
            .create(CreateTimerInput {
                name: "Tea".to_string(),
                seconds: 60,
                color: "red".to_string(),
                ..Default::default()
            })
            .unwrap();

        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.ui_mode, UiMode::ConfirmDeleteAll);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.engine.timers().len(), 1);

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.engine.timers().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_space_toggles_selected_timer() {
        let (mut app, _dir) = test_app();
        app.engine
            .create(CreateTimerInput {
                name: "Tea".to_string(),
                seconds: 60,
                color: "red".to_string(),
                ..Default::default()
            })
            .unwrap();

        press(&mut app, KeyCode::Char(' '));
        assert!(app.engine.timers()[0].is_running());
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.engine.timers()[0].is_running());
    }

    #[test]
    fn test_search_mode_round_trip() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.ui_mode, UiMode::Searching);
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.search_query, "t");
    }
}
