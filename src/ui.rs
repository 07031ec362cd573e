//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, format_mmss};

const CONTROLS: [(&str, &str); 6] = [
    ("p", "play"),
    ("s", "stop"),
    ("S", "start service"),
    ("X", "stop service"),
    ("d", "attach/detach view"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(app: &App, service_running: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    if service_running {
        parts.push(" SERVICE: Running".to_string());
    } else {
        parts.push(" SERVICE: Stopped".to_string());
    }

    if app.is_attached() {
        parts.push("VIEW: Attached".to_string());
    } else {
        parts.push("VIEW: Detached".to_string());
    }

    parts.push(format!("Dir: {}", app.music_dir));
    parts.join(" • ")
}

fn now_playing_text(app: &App) -> String {
    let label = app.label();
    if !app.is_attached() {
        return "(view detached; press d to reconnect)".to_string();
    }
    if label.is_empty() {
        return "Nothing playing".to_string();
    }

    match app.total() {
        Some(total) => format!("{label} [{} / {}]", app.progress(), format_mmss(total)),
        None => format!("{label} [{}]", app.progress()),
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, service_running: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(app.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" randplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, service_running))
        .block(Block::bordered().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let now_playing = Paragraph::new(now_playing_text(app))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .padding(Padding::vertical(1))
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[2]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
