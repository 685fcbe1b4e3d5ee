//! Stateless rendering of a session snapshot.

use crate::app::App;
use pattern_recall::{Cell, CellState, GRID_SIZE, Phase, ResultAction, SessionView};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, view: &SessionView, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Level text
            Constraint::Length(3), // Countdown or selection
            Constraint::Min(CELL_HEIGHT * GRID_SIZE as u16),
            Constraint::Length(6), // Result
            Constraint::Length(3), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    draw_header(frame, chunks[0], view);
    draw_level(frame, chunks[1], view);
    draw_progress(frame, chunks[2], view);
    draw_grid(frame, chunks[3], view, app);
    draw_result(frame, chunks[4], view);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[5]);

    let keys = Paragraph::new(key_help(view))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(keys, chunks[6]);
}

fn draw_header(frame: &mut Frame, area: Rect, view: &SessionView) {
    let line = Line::from(vec![
        Span::styled(
            "Pattern Recall",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Level {} / {}   Score: {}",
            view.level_number, view.level_count, view.score
        )),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_level(frame: &mut Frame, area: Rect, view: &SessionView) {
    let text = vec![
        Line::from(Span::styled(
            view.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(view.description.as_str()),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, view: &SessionView) {
    match view.phase {
        Phase::Observing => {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Memorize"))
                .gauge_style(Style::default().fg(Color::Blue))
                .ratio(view.countdown_ratio().clamp(0.0, 1.0))
                .label(format!("{}s", view.remaining));
            frame.render_widget(gauge, area);
        }
        Phase::Guessing | Phase::Result => {
            let selected = Paragraph::new(format!("Selected: {}", view.selection_count))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(selected, area);
        }
    }
}

fn draw_grid(frame: &mut Frame, area: Rect, view: &SessionView, app: &App) {
    let size = GRID_SIZE as u16;
    let board_area = center_rect(area, CELL_WIDTH * size, CELL_HEIGHT * size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); GRID_SIZE])
        .split(board_area);

    let cell_areas = rows.iter().flat_map(|row_area| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); GRID_SIZE])
            .split(*row_area)
            .to_vec()
    });
    for (cell, cell_area) in Cell::all().zip(cell_areas) {
        draw_cell(frame, cell_area, view, cell, app.cursor() == cell);
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &SessionView, cell: Cell, is_cursor: bool) {
    let state = view.cell(cell.index()).unwrap_or(CellState::Idle);
    let mut style = cell_style(state);
    let mut border = Style::default().fg(Color::DarkGray);
    if is_cursor && view.phase == Phase::Guessing {
        style = style.add_modifier(Modifier::REVERSED);
        border = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    let paragraph = Paragraph::new(cell.label().to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(paragraph, area);
}

fn cell_style(state: CellState) -> Style {
    match state {
        CellState::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        CellState::Incorrect => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
        CellState::Highlighted => Style::default().fg(Color::Black).bg(Color::Blue),
        CellState::Selected => Style::default().fg(Color::Black).bg(Color::Cyan),
        CellState::Idle => Style::default().fg(Color::DarkGray),
    }
}

fn draw_result(frame: &mut Frame, area: Rect, view: &SessionView) {
    let Some(summary) = &view.summary else {
        return;
    };

    let color = if summary.success {
        Color::Green
    } else {
        Color::Red
    };
    let mut text = vec![
        Line::from(Span::styled(
            summary.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(summary.message.as_str()),
    ];
    if view.hint_revealed {
        text.push(Line::from(Span::styled(
            format!("Hint: {}", view.hint),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn key_help(view: &SessionView) -> String {
    let mut keys = match view.phase {
        Phase::Observing => vec!["x reset"],
        Phase::Guessing => vec!["arrows/hjkl move", "space toggle", "s submit", "x reset"],
        Phase::Result => view
            .summary
            .iter()
            .flat_map(|summary| summary.actions.iter())
            .map(|action| match action {
                ResultAction::Next => "n next level",
                ResultAction::Finish => "n finish",
                ResultAction::Retry => "r retry",
                ResultAction::Restart => "r restart",
            })
            .collect(),
    };
    keys.push("q quit");
    keys.join("  |  ")
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(horizontal[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_recall::Session;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_grid_shows_one_based_labels() {
        let view = Session::standard().view();
        let app = App::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| draw(f, &view, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect();
        assert!(rows.iter().any(|row| row.contains("21") && row.contains("25")));
    }

    #[test]
    fn test_key_help_follows_phase() {
        let view = Session::standard().view();
        assert_eq!(key_help(&view), "x reset  |  q quit");
    }

    #[test]
    fn test_draw_observing_screen() {
        let view = Session::standard().view();
        let app = App::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| draw(f, &view, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Pattern Recall"));
        assert!(content.contains("Level 1 / 10"));
        assert!(content.contains("Even Positions"));
        assert!(content.contains("25"));
    }
}
