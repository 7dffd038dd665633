use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Session
    SignIn,
    SignOut,
    Quit,

    // Composer
    NextField,
    PrevField,
    NextTone,
    PrevTone,
    Generate,
    Copy,
    ScrollReplyUp,
    ScrollReplyDown,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Bindings shared by both modes
    fn common_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        map.insert(key_code(KeyCode::Enter), Action::SignIn);
        map.insert(key('q'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Quit);

        map.insert(key_code(KeyCode::Tab), Action::NextField);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevField);
        map.insert(key_code(KeyCode::Left), Action::PrevTone);
        map.insert(key_code(KeyCode::Right), Action::NextTone);

        map.insert(ctrl_key('g'), Action::Generate);
        map.insert(ctrl_key('y'), Action::Copy);
        map.insert(ctrl_key('o'), Action::SignOut);

        map.insert(key_code(KeyCode::PageUp), Action::ScrollReplyUp);
        map.insert(key_code(KeyCode::PageDown), Action::ScrollReplyDown);

        map
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        // Only reachable on the tone selector; on the email field they are text
        map.insert(key('h'), Action::PrevTone);
        map.insert(key('l'), Action::NextTone);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = Self::common_bindings();

        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(key_code(KeyCode::F(5)), Action::Generate);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        assert_eq!(bindings.get(&key('h')), Some(Action::PrevTone));
        assert_eq!(bindings.get(&key('l')), Some(Action::NextTone));
        assert_eq!(bindings.get(&ctrl_key('g')), Some(Action::Generate));
        assert_eq!(bindings.get(&key('q')), Some(Action::Quit));
    }

    #[test]
    fn test_arrow_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Arrows);

        assert_eq!(bindings.get(&key('h')), None);
        assert_eq!(bindings.get(&key_code(KeyCode::Right)), Some(Action::NextTone));
        assert_eq!(bindings.get(&key_code(KeyCode::F(5))), Some(Action::Generate));
        assert_eq!(bindings.get(&ctrl_key('q')), Some(Action::Quit));
    }

    #[test]
    fn test_shared_bindings() {
        for mode in [KeybindingMode::Vim, KeybindingMode::Arrows] {
            let bindings = KeyBindings::new(&mode);
            assert_eq!(bindings.get(&key_code(KeyCode::Enter)), Some(Action::SignIn));
            assert_eq!(bindings.get(&ctrl_key('y')), Some(Action::Copy));
            assert_eq!(bindings.get(&ctrl_key('o')), Some(Action::SignOut));
            assert_eq!(bindings.get(&key_code(KeyCode::Esc)), Some(Action::Quit));
            assert_eq!(
                bindings.get(&key_code(KeyCode::PageDown)),
                Some(Action::ScrollReplyDown)
            );
        }
    }
}
