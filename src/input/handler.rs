use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, FormField};

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
    /// Bracketed paste into the email field
    Paste(String),
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        Event::Paste(text) if accepts_text(state) => InputResult::Paste(text),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Ctrl+C always quits, whatever has focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    if !state.is_signed_in() {
        return handle_sign_in_input(key, state, bindings);
    }

    match state.focus {
        FormField::EmailText => handle_email_input(key, state, bindings),
        FormField::Tone => handle_tone_input(key, state, bindings),
    }
}

/// The email field accepts edits only while no request is in flight
fn accepts_text(state: &AppState) -> bool {
    state.is_signed_in() && state.focus == FormField::EmailText && !state.form.is_loading()
}

fn is_text_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_)) && (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

fn handle_sign_in_input(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match bindings.get(&key) {
        Some(Action::Quit) => InputResult::Quit,
        Some(Action::SignIn) if !state.session.is_signing_in() => {
            InputResult::Action(Action::SignIn)
        }
        _ => InputResult::Continue,
    }
}

/// Actions available from both composer fields
fn composer_action(action: Action, state: &AppState) -> InputResult {
    match action {
        Action::Quit => InputResult::Quit,
        // Submit is disabled while a request is in flight
        Action::Generate if state.form.is_loading() => InputResult::Continue,
        Action::Generate
        | Action::Copy
        | Action::SignOut
        | Action::NextField
        | Action::PrevField
        | Action::ScrollReplyUp
        | Action::ScrollReplyDown => InputResult::Action(action),
        Action::SignIn | Action::NextTone | Action::PrevTone => InputResult::Continue,
    }
}

fn handle_email_input(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    if is_text_key(&key) {
        return match key.code {
            KeyCode::Char(c) if accepts_text(state) => InputResult::Char(c),
            _ => InputResult::Continue,
        };
    }

    match key.code {
        KeyCode::Enter if accepts_text(state) => return InputResult::Char('\n'),
        KeyCode::Backspace if accepts_text(state) => return InputResult::Backspace,
        KeyCode::Enter | KeyCode::Backspace => return InputResult::Continue,
        _ => {}
    }

    match bindings.get(&key) {
        Some(action) => composer_action(action, state),
        None => InputResult::Continue,
    }
}

fn handle_tone_input(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match bindings.get(&key) {
        Some(Action::NextTone | Action::PrevTone) if state.form.is_loading() => {
            InputResult::Continue
        }
        Some(action @ (Action::NextTone | Action::PrevTone)) => InputResult::Action(action),
        // Plain letters never quit from inside the composer
        Some(Action::Quit) if is_text_key(&key) => InputResult::Continue,
        Some(action) => composer_action(action, state),
        None => InputResult::Continue,
    }
}
