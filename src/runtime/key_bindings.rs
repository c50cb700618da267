use crate::runtime::intent::Intent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::traits::TextAction;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Intent>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Intent> {
        self.bindings.get(&KeyBinding::from_event(event)).cloned()
    }

    /// Unbound keys go to the focused widget.
    pub fn resolve_or_input(&self, event: KeyEvent) -> Intent {
        self.resolve(event).unwrap_or(Intent::InputKey(event))
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Intent::Cancel);
        self.bind(KeyBinding::ctrl(KeyCode::Char('s')), Intent::Submit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('r')), Intent::Reset);
        self.bind(KeyBinding::key(KeyCode::Tab), Intent::NextFocus);
        self.bind(KeyBinding::key(KeyCode::BackTab), Intent::PrevFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Intent::PrevFocus,
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Backspace),
            Intent::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('w')),
            Intent::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Delete),
            Intent::TextAction(TextAction::DeleteWordRight),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::intent::Intent;
    use crate::terminal::{KeyCode, KeyEvent};

    #[test]
    fn defaults_cover_form_actions() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.resolve(KeyEvent::ctrl(KeyCode::Char('s'))), Some(Intent::Submit));
        assert_eq!(bindings.resolve(KeyEvent::ctrl(KeyCode::Char('r'))), Some(Intent::Reset));
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Tab)), Some(Intent::NextFocus));
    }

    #[test]
    fn unbound_keys_become_input() {
        let mut bindings = KeyBindings::new();
        let key = KeyEvent::plain(KeyCode::Char('s'));
        assert_eq!(bindings.resolve_or_input(key), Intent::InputKey(key));

        bindings.unbind(&KeyBinding::key(KeyCode::Tab));
        let tab = KeyEvent::plain(KeyCode::Tab);
        assert_eq!(bindings.resolve_or_input(tab), Intent::InputKey(tab));
    }
}
