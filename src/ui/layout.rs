use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub list_area: Rect,
    pub details_area: Rect,
    pub history_area: Option<Rect>,
    pub keybindings_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: List (70%) | Details (30%)
/// - History pane below (when showing)
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect, show_history: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];
    let status_area = main_chunks[2];

    let (top_area, history_area) = if show_history {
        let vertical_split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(65), // List + details
                Constraint::Percentage(35), // History pane
            ])
            .split(content_area);
        (vertical_split[0], Some(vertical_split[1]))
    } else {
        (content_area, None)
    };

    let top_horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // List pane
            Constraint::Percentage(30), // Details pane
        ])
        .split(top_area);

    MainLayout {
        list_area: top_horizontal[0],
        details_area: top_horizontal[1],
        history_area,
        keybindings_area,
        status_area,
    }
}

/// Create centered modal area (for the create form and confirm prompts)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
