use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{Theme, symbols};
use super::widgets::{error_bar, help_bar, sanitize_text, spinner_char, status_bar};
use crate::app::state::{AppState, FormField};
use crate::reply::{ReplyError, Tone};
use crate::session::UserProfile;

struct ComposerLayout {
    status_area: Rect,
    welcome_area: Rect,
    email_area: Rect,
    tone_area: Rect,
    error_area: Rect,
    reply_area: Rect,
    help_area: Rect,
}

fn compute_layout(area: Rect, error_rows: u16) -> ComposerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Status bar
            Constraint::Length(2),          // Welcome header
            Constraint::Percentage(40),     // Email text
            Constraint::Length(3),          // Tone selector
            Constraint::Length(error_rows), // Inline error
            Constraint::Min(5),             // Suggested reply
            Constraint::Length(1),          // Help bar
        ])
        .split(area);

    ComposerLayout {
        status_area: chunks[0],
        welcome_area: chunks[1],
        email_area: chunks[2],
        tone_area: chunks[3],
        error_area: chunks[4],
        reply_area: chunks[5],
        help_area: chunks[6],
    }
}

/// Inline error text, indented one column
fn error_text(error: &ReplyError) -> String {
    format!(" {}", error.user_message())
}

/// Rows for the inline error: the wrapped message, within a quarter of the screen
fn error_rows(state: &AppState, area: Rect) -> u16 {
    state
        .form
        .error()
        .map(|e| wrapped_height(&error_text(&e), area.width))
        .unwrap_or(1)
        .min(area.height / 4)
        .max(1)
}

/// Largest useful scroll offset for the suggested reply in a screen of `area`
pub(crate) fn reply_scroll_limit(state: &AppState, area: Rect) -> u16 {
    let Some(reply) = state.form.reply() else {
        return 0;
    };
    let layout = compute_layout(area, error_rows(state, area));
    let inner = Block::default().borders(Borders::ALL).inner(layout.reply_area);
    wrapped_height(&sanitize_text(reply), inner.width).saturating_sub(inner.height)
}

pub fn render_composer(frame: &mut Frame, state: &AppState, user: &UserProfile) {
    let area = frame.area();
    let layout = compute_layout(area, error_rows(state, area));
    let form = &state.form;

    let left = if state.status.message.is_empty() {
        "QuickReply AI".to_string()
    } else {
        format!("QuickReply AI │ {}", state.status.message)
    };
    let right = format!("{} <{}>", user.display_name, user.email);
    status_bar(frame, layout.status_area, &left, &right, state.is_busy());

    render_welcome(frame, layout.welcome_area, user);

    render_email_field(
        frame,
        layout.email_area,
        &form.email_text,
        state.focus == FormField::EmailText,
        form.is_loading(),
    );

    render_tone_selector(
        frame,
        layout.tone_area,
        form.tone,
        state.focus == FormField::Tone,
    );

    if let Some(error) = form.error() {
        let style = match error {
            ReplyError::Validation => Theme::text_warning(),
            ReplyError::Service(_) => Theme::text_error(),
        };
        let paragraph = Paragraph::new(error_text(&error))
            .style(style)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, layout.error_area);
    }

    let scroll = reply_scroll_limit(state, area).min(state.reply_scroll);
    render_reply_pane(frame, layout.reply_area, state, scroll);

    if let Some(ref error) = state.status.error {
        error_bar(frame, layout.help_area, error);
    } else {
        let hints: &[(&str, &str)] = if form.is_loading() {
            &[("Ctrl+O", "sign out"), ("Esc", "quit")]
        } else if form.reply().is_some() {
            &[
                ("Ctrl+G", "generate"),
                ("Ctrl+Y", "copy"),
                ("PgUp/PgDn", "scroll"),
                ("Tab", "field"),
                ("←/→", "tone"),
                ("Ctrl+O", "sign out"),
                ("Esc", "quit"),
            ]
        } else {
            &[
                ("Ctrl+G", "generate"),
                ("Tab", "field"),
                ("←/→", "tone"),
                ("Ctrl+O", "sign out"),
                ("Esc", "quit"),
            ]
        };
        help_bar(frame, layout.help_area, hints);
    }
}

fn render_welcome(frame: &mut Frame, area: Rect, user: &UserProfile) {
    let lines = vec![
        Line::from(Span::styled(
            format!(" Welcome, {}!", user.first_name()),
            Theme::title(),
        )),
        Line::from(Span::styled(
            " Paste the email you received, choose a tone and generate a reply.",
            Theme::text_muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_email_field(frame: &mut Frame, area: Rect, text: &str, focused: bool, locked: bool) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let title = format!(" Email ({} chars) ", text.chars().count());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if text.is_empty() && !focused {
        let placeholder =
            Paragraph::new("Paste the email content here...").style(Theme::text_muted());
        frame.render_widget(placeholder, inner);
        return;
    }

    let style = if focused && !locked {
        Theme::text()
    } else {
        Theme::text_secondary()
    };

    let mut display = sanitize_text(text);
    if focused && !locked {
        display.push_str(symbols::CURSOR);
    }

    // Keep the end of the text (where typing happens) in view
    let scroll = wrapped_height(&display, inner.width).saturating_sub(inner.height);
    let paragraph = Paragraph::new(display)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn render_tone_selector(frame: &mut Frame, area: Rect, selected: Tone, focused: bool) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Tone ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let arrow_style = if focused {
        Theme::text_accent()
    } else {
        Theme::text_muted()
    };

    let mut spans = vec![Span::styled(format!("{} ", symbols::TONE_PREV), arrow_style)];
    for tone in Tone::ALL {
        let style = if tone == selected {
            Theme::selected()
        } else {
            Theme::text_secondary()
        };
        spans.push(Span::styled(format!(" {} ", tone.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(symbols::TONE_NEXT, arrow_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_reply_pane(frame: &mut Frame, area: Rect, state: &AppState, scroll: u16) {
    let form = &state.form;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" Suggested Reply ", Theme::text_accent()));
    if form.is_copied() {
        let badge = Line::from(Span::styled(" Copied! ", Theme::badge_success()));
        block = block.title(badge.right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = if form.is_loading() {
        Paragraph::new(format!("{} Generating reply...", spinner_char()))
            .style(Theme::text_warning())
    } else if let Some(reply) = form.reply() {
        Paragraph::new(sanitize_text(reply))
            .style(Theme::text())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
    } else {
        Paragraph::new("Your AI-generated reply will appear here.").style(Theme::text_muted())
    };
    frame.render_widget(paragraph, inner);
}

/// Rows `text` occupies when word-wrapped at `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = text.split('\n').map(|line| line_rows(line, width)).sum();
    rows.min(u16::MAX as usize) as u16
}

/// Greedy word wrap; words wider than the line are broken across rows
fn line_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    for word in line.split(' ') {
        let w = word.width();
        let joined = if col == 0 { w } else { col + 1 + w };
        if joined <= width {
            col = joined;
        } else if w <= width {
            rows += 1;
            col = w;
        } else {
            if col > 0 {
                rows += 1;
            }
            rows += (w - 1) / width;
            col = (w - 1) % width + 1;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MockIdentityProvider, SessionState};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| crate::ui::render(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn signed_in() -> AppState {
        AppState {
            session: SessionState::SignedIn(MockIdentityProvider::profile()),
            ..Default::default()
        }
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("0123456789ab", 10), 2);
        assert_eq!(wrapped_height("a\nb\n", 10), 3);
        // Words move to the next row instead of splitting
        assert_eq!(wrapped_height("hello world", 8), 2);
        assert_eq!(wrapped_height("hi 0123456789ab", 10), 3);
    }

    #[test]
    fn test_composer_greets_user() {
        let screen = draw(&signed_in());
        assert!(screen.contains("Welcome, Alex!"));
        assert!(screen.contains("alex.wolfe@example.com"));
        assert!(screen.contains("Suggested Reply"));
    }

    #[test]
    fn test_reply_and_copied_badge() {
        struct Sink;
        impl crate::clipboard::ClipboardSink for Sink {
            fn write_text(&mut self, _: &str) -> Result<(), crate::clipboard::ClipboardError> {
                Ok(())
            }
        }

        let mut state = signed_in();
        state.form.email_text = "Can we reschedule to Friday?".to_string();
        let pending = state.form.begin_submit().unwrap();
        assert!(draw(&state).contains("Generating reply..."));

        state.form.complete(pending.request_id, Ok("Sure, Friday works!".to_string()));
        let screen = draw(&state);
        assert!(screen.contains("Sure, Friday works!"));
        assert!(!screen.contains("Copied!"));

        state.form.copy_reply(&mut Sink, Instant::now()).unwrap();
        assert!(draw(&state).contains("Copied!"));
    }

    #[test]
    fn test_validation_message_shown() {
        let mut state = signed_in();
        state.form.begin_submit().unwrap_err();
        assert!(draw(&state).contains(crate::constants::VALIDATION_MESSAGE));
    }

    #[test]
    fn test_long_service_error_wraps() {
        let mut state = signed_in();
        state.form.email_text = "Hello".to_string();
        let pending = state.form.begin_submit().unwrap();
        let message = "error sending request for url (https://generativelanguage.googleapis.com\
                       /v1beta/models/gemini-2.5-flash:generateContent)";
        state.form.complete(
            pending.request_id,
            Err(crate::ai::AiError::Transport(message.to_string())),
        );

        let screen = draw(&state);
        assert!(screen.contains("communicating with the AI: error sending request"));
        assert!(screen.contains("gemini-2.5-flash:generateContent)"));
    }

    #[test]
    fn test_long_reply_scrolls() {
        let mut state = signed_in();
        state.form.email_text = "Hello".to_string();
        let pending = state.form.begin_submit().unwrap();
        let reply: Vec<String> = (1..=40).map(|i| format!("line {:02}", i)).collect();
        state.form.complete(pending.request_id, Ok(reply.join("\n")));

        let screen = draw(&state);
        assert!(screen.contains("line 01"));
        assert!(!screen.contains("line 40"));

        // Offsets past the end stop at the last row
        state.reply_scroll = u16::MAX;
        let screen = draw(&state);
        assert!(screen.contains("line 40"));
        assert!(!screen.contains("line 01"));

        let area = Rect::new(0, 0, 100, 30);
        assert!(reply_scroll_limit(&state, area) > 0);
    }

    #[test]
    fn test_short_reply_does_not_scroll() {
        let mut state = signed_in();
        state.form.email_text = "Hello".to_string();
        let pending = state.form.begin_submit().unwrap();
        state.form.complete(pending.request_id, Ok("Sure!".to_string()));

        assert_eq!(reply_scroll_limit(&state, Rect::new(0, 0, 100, 30)), 0);
        assert_eq!(reply_scroll_limit(&signed_in(), Rect::new(0, 0, 100, 30)), 0);
    }

    #[test]
    fn test_sign_in_screen() {
        let mut state = AppState::default();
        assert!(draw(&state).contains("Press Enter to sign in"));

        state.session.begin_sign_in();
        assert!(draw(&state).contains("Signing In..."));
    }
}
