//! Desktop notification when a reply finishes generating

use crate::config::Config;
use crate::constants::NOTIFICATION_PREVIEW_CHARS;

/// Send a desktop notification that a drafted reply is ready
pub fn notify_reply_ready(config: &Config, reply: &str) {
    if !config.notifications.enabled {
        return;
    }

    let body = config
        .notifications
        .show_preview
        .then(|| preview(reply, NOTIFICATION_PREVIEW_CHARS));

    // Fire and forget, a missing notification daemon is not an error
    if let Err(e) = send_notification("Reply ready", body.as_deref()) {
        tracing::warn!("Failed to send desktop notification: {}", e);
    }
}

/// First line of the reply, cut to `max_chars` characters
fn preview(reply: &str, max_chars: usize) -> String {
    let line = reply.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() > max_chars {
        let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// Low-level notification sending
fn send_notification(summary: &str, body: Option<&str>) -> Result<(), notify_rust::error::Error> {
    use notify_rust::Notification;

    let mut notification = Notification::new();
    notification
        .summary(summary)
        .appname("quickreply")
        .timeout(notify_rust::Timeout::Milliseconds(5000));

    if let Some(body) = body {
        notification.body(body);
    }

    notification.icon("mail-reply-sender");

    notification.show()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_uses_first_non_blank_line() {
        assert_eq!(preview("\n  Hi Sam,  \nThanks!", 100), "Hi Sam,");
        assert_eq!(preview("", 100), "");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let reply = "é".repeat(120);
        let cut = preview(&reply, 100);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_disabled_notifications_do_nothing() {
        let mut config = Config::default();
        config.notifications.enabled = false;
        // Must return without touching the notification daemon
        notify_reply_ready(&config, "Sure, Friday works!");
    }
}
