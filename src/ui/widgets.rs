//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::constants::SPINNER_FRAME_MS;

pub fn error_bar(frame: &mut Frame, area: Rect, message: &str) {
    let style = Theme::error_bar();
    let paragraph = Paragraph::new(format!(" Error: {} ", message)).style(style);
    frame.render_widget(paragraph, area);
}

pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let available_width = area.width as usize;

    // " key desc │" per hint, trailing space after the last
    let hint_widths: Vec<usize> = hints
        .iter()
        .enumerate()
        .map(|(i, (key, desc))| {
            let base = format!(" {} ", key).width() + desc.width();
            if i < hints.len() - 1 { base + 3 } else { base + 1 }
        })
        .collect();

    let mut total_width = 0;
    let mut hints_to_show = 0;
    for width in &hint_widths {
        if total_width + width <= available_width {
            total_width += width;
            hints_to_show += 1;
        } else {
            break;
        }
    }

    // Show at least one hint if possible
    hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i < hints_to_show - 1 {
            spans.push(Span::styled(" │ ", Theme::text_muted()));
        }
    }
    spans.push(Span::styled(" ", Theme::text_muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status bar with left and right text; `busy` prefixes a spinner
pub fn status_bar(frame: &mut Frame, area: Rect, left: &str, right: &str, busy: bool) {
    let style = Theme::status_bar();

    let indicator = if busy {
        format!(" {}", spinner_char())
    } else {
        String::new()
    };
    let left = format!("{} {} ", indicator, left);
    let right = truncate_to_width(right, (area.width as usize).saturating_sub(left.width() + 2));
    let right = format!(" {} ", right);

    let padding = (area.width as usize).saturating_sub(left.width() + right.width());

    let line = Line::from(vec![
        Span::styled(left, if busy { Theme::status_busy() } else { style }),
        Span::styled(" ".repeat(padding), style),
        Span::styled(right, style),
    ]);

    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Truncate string to fit display width
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push_str("...");
    result
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    const SPINNER: [char; 10] = [
        '⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏',
    ];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    SPINNER[(millis / SPINNER_FRAME_MS) as usize % SPINNER.len()]
}

/// Sanitize text for display: drop ANSI escape sequences and control characters
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Skip until the terminating letter
            while let Some(&ch) = chars.peek() {
                chars.next();
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c == '\t' {
            result.push_str("    ");
        } else if c.is_control() && c != '\n' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Alex Wolfe", 20), "Alex Wolfe");
        assert_eq!(truncate_to_width("alex.wolfe@example.com", 10), "alex.wo...");
        assert_eq!(truncate_to_width("abcdef", 2), "ab");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(sanitize_text("a\tb\r\nc"), "a    b \nc");
    }
}
