use crate::domain::{visible_timers, CreateTimerInput, SortKey, Timer, UiMode};
use crate::engine::{TimerEngine, TimerEvent};
use crate::notifications;
use std::time::Instant;
use uuid::Uuid;

/// Color palette offered by the create form
///
/// The engine treats the color as an opaque tag; only the UI maps these
/// names to terminal colors.
pub const COLOR_PALETTE: [&str; 8] = [
    "red", "orange", "yellow", "green", "teal", "blue", "purple", "pink",
];

/// Input form state for creating a timer
#[derive(Debug, Clone)]
pub struct TimerFormState {
    pub name: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub description: String,
    pub alert: String,
    pub color_index: usize,
    /// 0 = name, 1 = hours, 2 = minutes, 3 = seconds, 4 = description, 5 = alert
    pub editing_field: usize,
}

impl TimerFormState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            hours: String::new(),
            minutes: String::new(),
            seconds: String::new(),
            description: String::new(),
            alert: String::new(),
            color_index: 0,
            editing_field: 0,
        }
    }

    pub fn color(&self) -> &'static str {
        COLOR_PALETTE[self.color_index % COLOR_PALETTE.len()]
    }

    fn field_mut(&mut self) -> &mut String {
        match self.editing_field {
            0 => &mut self.name,
            1 => &mut self.hours,
            2 => &mut self.minutes,
            3 => &mut self.seconds,
            4 => &mut self.description,
            _ => &mut self.alert,
        }
    }

    /// Whether the currently edited field only accepts digits
    fn field_is_numeric(&self) -> bool {
        matches!(self.editing_field, 1 | 2 | 3 | 5)
    }
}

/// Main application state: the engine plus UI-only state
pub struct AppState {
    pub engine: TimerEngine,
    pub ui_mode: UiMode,
    pub selected: usize,
    pub sort_key: SortKey,
    pub search_query: String,
    pub input_form: Option<TimerFormState>,
    pub status: Option<String>,
    pub show_history: bool,
    pub history_scroll: usize,
}

impl AppState {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            engine,
            ui_mode: UiMode::Normal,
            selected: 0,
            sort_key: SortKey::Status,
            search_query: String::new(),
            input_form: None,
            status: None,
            show_history: true,
            history_scroll: 0,
        }
    }

    /// Indices into the engine's timer list, filtered and sorted for display
    pub fn visible_rows(&self) -> Vec<usize> {
        visible_timers(self.engine.timers(), self.sort_key, &self.search_query)
    }

    /// The timer currently under the cursor
    pub fn selected_timer(&self) -> Option<&Timer> {
        let rows = self.visible_rows();
        let idx = *rows.get(self.selected)?;
        self.engine.timers().get(idx)
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_timer().map(|t| t.id)
    }

    fn visible_ids(&self) -> Vec<Uuid> {
        let timers = self.engine.timers();
        self.visible_rows().iter().map(|&i| timers[i].id).collect()
    }

    /// Keep the cursor on a valid row after the list changes
    pub fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected + 1 < self.visible_rows().len() {
            self.selected += 1;
        }
    }

    /// Record a command outcome in the status line
    fn report<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            self.status = Some(e.to_string());
        }
    }

    /// Toggle run/pause for the selected timer
    pub fn toggle_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected_id() {
            let result = self.engine.toggle(id, now);
            self.report(result);
        }
    }

    /// Reset the selected timer
    pub fn reset_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected_id() {
            let result = self.engine.reset(id, now);
            self.report(result);
        }
    }

    /// Delete the selected timer
    pub fn delete_selected(&mut self, now: Instant) {
        if let Some(id) = self.selected_id() {
            let result = self.engine.delete(id, now);
            self.report(result);
            self.clamp_selection();
        }
    }

    /// Start every visible timer that is not completed
    pub fn start_all_visible(&mut self, now: Instant) {
        let ids: Vec<Uuid> = self
            .visible_ids()
            .into_iter()
            .filter(|id| {
                self.engine
                    .find(*id)
                    .map(|t| t.state.is_toggleable())
                    .unwrap_or(false)
            })
            .collect();
        if !ids.is_empty() {
            let result = self.engine.start_many(&ids, now);
            self.report(result);
        }
    }

    /// Pause every visible timer
    pub fn pause_all_visible(&mut self, now: Instant) {
        let ids = self.visible_ids();
        if !ids.is_empty() {
            let result = self.engine.pause_many(&ids, now);
            self.report(result);
        }
    }

    /// Reset every visible timer
    pub fn reset_all_visible(&mut self, now: Instant) {
        let ids = self.visible_ids();
        if !ids.is_empty() {
            let result = self.engine.reset_many(&ids, now);
            self.report(result);
        }
    }

    /// Remove completed timers from the live list
    pub fn clear_completed(&mut self, now: Instant) {
        let result = self.engine.clear_completed(now);
        self.report(result);
        self.clamp_selection();
    }

    /// Empty the history log (after confirmation)
    pub fn clear_history(&mut self) {
        let result = self.engine.clear_history();
        self.report(result);
        self.history_scroll = 0;
        self.ui_mode = UiMode::Normal;
    }

    /// Delete every live timer (after confirmation)
    pub fn delete_all(&mut self, now: Instant) {
        let result = self.engine.delete_all(now);
        self.report(result);
        self.selected = 0;
        self.ui_mode = UiMode::Normal;
    }

    /// Advance due ticks and present emitted events
    pub fn tick(&mut self, now: Instant) {
        let (events, persisted) = self.engine.tick_due(now);

        for event in &events {
            notifications::notify_event(event);
            if let TimerEvent::Completed { name, .. } = event {
                self.status = Some(format!("\"{}\" is done", name));
            }
        }

        self.report(persisted);
        self.clamp_selection();
    }

    /// Cycle the list sort order
    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        self.clamp_selection();
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.search_query.push(c);
        self.clamp_selection();
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    pub fn toggle_show_history(&mut self) {
        self.show_history = !self.show_history;
        self.history_scroll = 0;
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll + 1 < self.engine.history().len() {
            self.history_scroll += 1;
        }
    }

    /// Open the create-timer form
    pub fn start_add_timer(&mut self) {
        self.input_form = Some(TimerFormState::new());
        self.ui_mode = UiMode::AddingTimer;
    }

    /// Move to the next form field (Tab)
    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 6;
        }
    }

    /// Add a character to the current form field
    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            if form.field_is_numeric() && !c.is_ascii_digit() {
                return;
            }
            form.field_mut().push(c);
        }
    }

    /// Backspace in the current form field
    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field_mut().pop();
        }
    }

    /// Cycle the color choice (left/right arrows)
    pub fn form_next_color(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.color_index = (form.color_index + 1) % COLOR_PALETTE.len();
        }
    }

    pub fn form_prev_color(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.color_index = (form.color_index + COLOR_PALETTE.len() - 1) % COLOR_PALETTE.len();
        }
    }

    /// Submit the create form
    ///
    /// Validation failures keep the form open with the error in the status
    /// line; nothing is created.
    pub fn submit_input_form(&mut self) {
        let Some(form) = &self.input_form else {
            return;
        };

        let alert = match form.alert.trim() {
            "" => None,
            s => match s.parse::<u8>() {
                Ok(v) => Some(v),
                Err(_) => {
                    self.status = Some("alert percentage must be a number 0-100".to_string());
                    return;
                }
            },
        };

        let description = form.description.trim();
        let input = CreateTimerInput {
            name: form.name.clone(),
            hours: form.hours.parse().unwrap_or(0),
            minutes: form.minutes.parse().unwrap_or(0),
            seconds: form.seconds.parse().unwrap_or(0),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            color: form.color().to_string(),
            alert_percentage: alert,
        };

        match self.engine.create(input) {
            Ok(_) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.status = None;
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    /// Cancel the create form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::TimerStore;
    use std::time::Duration;
    use tempfile::tempdir;

    fn test_app() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let engine = TimerEngine::load(TimerStore::new(dir.path())).unwrap();
        (AppState::new(engine), dir)
    }

    fn add_timer(app: &mut AppState, name: &str, seconds: u32) -> Uuid {
        app.engine
            .create(CreateTimerInput {
                name: name.to_string(),
                seconds,
                color: "red".to_string(),
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let (mut app, _dir) = test_app();
        add_timer(&mut app, "A", 60);
        add_timer(&mut app, "B", 60);

        app.move_selection_up();
        assert_eq!(app.selected, 0);
        app.move_selection_down();
        assert_eq!(app.selected, 1);
        app.move_selection_down();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_delete_selected_clamps_cursor() {
        let (mut app, _dir) = test_app();
        add_timer(&mut app, "A", 60);
        add_timer(&mut app, "B", 60);
        app.selected = 1;

        app.delete_selected(Instant::now());
        assert_eq!(app.engine.timers().len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_form_numeric_fields_reject_letters() {
        let (mut app, _dir) = test_app();
        app.start_add_timer();
        app.form_next_field(); // hours
        app.form_add_char('x');
        app.form_add_char('2');

        assert_eq!(app.input_form.as_ref().unwrap().hours, "2");
    }

    #[test]
    fn test_form_color_cycles_both_ways() {
        let (mut app, _dir) = test_app();
        app.start_add_timer();

        app.form_prev_color();
        assert_eq!(app.input_form.as_ref().unwrap().color(), "pink");
        app.form_next_color();
        assert_eq!(app.input_form.as_ref().unwrap().color(), "red");
    }

    #[test]
    fn test_submit_valid_form_creates_timer() {
        let (mut app, _dir) = test_app();
        app.start_add_timer();
        for c in "Tea".chars() {
            app.form_add_char(c);
        }
        app.form_next_field(); // hours
        app.form_next_field(); // minutes
        app.form_add_char('5');
        app.submit_input_form();

        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.engine.timers().len(), 1);
        assert_eq!(app.engine.timers()[0].name, "Tea");
        assert_eq!(app.engine.timers()[0].duration, 300);
    }

    #[test]
    fn test_submit_invalid_form_stays_open() {
        let (mut app, _dir) = test_app();
        app.start_add_timer();
        // No name, no duration
        app.submit_input_form();

        assert!(app.input_form.is_some());
        assert!(app.status.is_some());
        assert!(app.engine.timers().is_empty());
    }

    #[test]
    fn test_search_narrows_visible_rows() {
        let (mut app, _dir) = test_app();
        add_timer(&mut app, "Tea", 60);
        add_timer(&mut app, "Laundry", 60);
        app.selected = 1;

        app.start_search();
        for c in "tea".chars() {
            app.search_add_char(c);
        }

        assert_eq!(app.visible_rows().len(), 1);
        assert_eq!(app.selected, 0);

        app.clear_search();
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_start_all_visible_skips_completed() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        let done = add_timer(&mut app, "Done", 1);
        add_timer(&mut app, "Fresh", 60);

        app.engine.toggle(done, t0).unwrap();
        let _ = app.engine.tick_due(t0 + Duration::from_secs(1));

        app.start_all_visible(t0 + Duration::from_secs(1));
        assert!(app.status.is_none());

        let running: Vec<&str> = app
            .engine
            .timers()
            .iter()
            .filter(|t| t.is_running())
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(running, vec!["Fresh"]);
    }

    #[test]
    fn test_tick_sets_completion_status() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        let id = add_timer(&mut app, "Tea", 1);
        app.engine.toggle(id, t0).unwrap();

        app.tick(t0 + Duration::from_secs(1));
        assert_eq!(app.status.as_deref(), Some("\"Tea\" is done"));
    }

    #[test]
    fn test_toggle_completed_surfaces_error() {
        let (mut app, _dir) = test_app();
        let t0 = Instant::now();
        let id = add_timer(&mut app, "Tea", 1);
        app.engine.toggle(id, t0).unwrap();
        app.tick(t0 + Duration::from_secs(1));
        app.status = None;

        app.toggle_selected(t0 + Duration::from_secs(2));
        assert!(app.status.as_deref().unwrap().contains("already completed"));
    }
}
