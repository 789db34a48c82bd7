use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // first 'g' of "gg"
    NextSection,
    PrevSection,
    /// Follow a nav bar link (0 is the logo)
    NavLink(usize),
    ToggleInspector,
    RecomputeSnap,
    Remount,
    ShowHelp,
    ExitMode,
    None,
}

/// Map a key press to an action using the configured keymap
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // any key closes help
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap.get_pending_g_action().cloned().unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    // terminals disagree on whether Shift is reported with uppercase chars
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_uppercase() && !key.modifiers.contains(KeyModifiers::SHIFT) {
            if let Some(action) = keymap.get(&KeyBinding::shift(key.code)) {
                return action.clone();
            }
        }
        // shifted punctuation such as '?'
        if !c.is_ascii_alphabetic() && key.modifiers == KeyModifiers::SHIFT {
            if let Some(action) = keymap.get(&KeyBinding::simple(key.code)) {
                return action.clone();
            }
        }
    }

    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use choreo_core::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_gg_needs_two_presses() {
        let config = AppConfig::default();
        let keymap = Keymap::from_config(&config.keymap);
        let mut app = App::new(config, Theme::default()).unwrap();

        let g = key(KeyCode::Char('g'));
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[tokio::test]
    async fn test_help_mode_swallows_keys() {
        let config = AppConfig::default();
        let keymap = Keymap::from_config(&config.keymap);
        let mut app = App::new(config, Theme::default()).unwrap();
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app, &keymap), Action::ExitMode);
    }

    #[tokio::test]
    async fn test_digits_follow_nav_links() {
        let config = AppConfig::default();
        let keymap = Keymap::from_config(&config.keymap);
        let app = App::new(config, Theme::default()).unwrap();
        assert_eq!(handle_key_event(key(KeyCode::Char('2')), &app, &keymap), Action::NavLink(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app, &keymap), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), &app, &keymap), Action::None);
    }
}
