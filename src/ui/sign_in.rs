use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::theme::Theme;
use super::widgets::{help_bar, spinner_char};
use crate::app::state::AppState;
use crate::session::SessionState;

pub fn render_sign_in(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let card = centered_rect(60, 11, chunks[0]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines = vec![
        Line::from(Span::styled("QuickReply AI", Theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            "Paste an email, pick a tone, and get a ready-to-send reply.",
            Theme::text_secondary(),
        )),
        Line::from(""),
    ];

    match &state.session {
        SessionState::SigningIn => lines.push(Line::from(Span::styled(
            format!("{} Signing In...", spinner_char()),
            Theme::text_warning(),
        ))),
        SessionState::SignedOut { error } => {
            lines.push(Line::from(vec![
                Span::styled("Press ", Theme::text_muted()),
                Span::styled("Enter", Theme::help_key()),
                Span::styled(" to sign in", Theme::text_muted()),
            ]));
            if let Some(error) = error {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Sign-in failed: {}", error),
                    Theme::text_error(),
                )));
            }
        }
        SessionState::SignedIn(_) => {}
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);

    let hints: &[(&str, &str)] = if state.session.is_signing_in() {
        &[("Esc", "quit")]
    } else {
        &[("Enter", "sign in"), ("q", "quit")]
    };
    help_bar(frame, chunks[1], hints);
}

/// Rectangle `percent_x` wide and `height` rows tall, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
