//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for wizard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

#[cfg(target_os = "macos")]
const MODIFIER_LABEL: &str = "Cmd";

#[cfg(not(target_os = "macos"))]
const MODIFIER_LABEL: &str = "Ctrl";

/// Continue to the next step
pub const CONTINUE_KEY: char = 'n';
/// Back to the previous step
pub const PREVIOUS_KEY: char = 'p';
/// Save progress on entry steps, submit on review
pub const SAVE_KEY: char = 's';
/// Start over with an empty form
pub const RESET_KEY: char = 'r';

/// Whether `key` is the shortcut for `c`. Ctrl is accepted everywhere
/// since most macOS terminals never forward Cmd.
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    let modified = key.modifiers.contains(SHORTCUT_MODIFIER)
        || key.modifiers.contains(KeyModifiers::CONTROL);
    modified && key.code == KeyCode::Char(c)
}

/// Display text for a shortcut, e.g. "Ctrl+N"
pub fn shortcut_label(c: char) -> String {
    format!("{MODIFIER_LABEL}+{}", c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_always_matches() {
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(is_shortcut(&key, CONTINUE_KEY));
        assert!(!is_shortcut(&key, PREVIOUS_KEY));
    }

    #[test]
    fn test_plain_key_is_not_shortcut() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(!is_shortcut(&key, SAVE_KEY));
    }

    #[test]
    fn test_label_is_uppercase() {
        assert!(shortcut_label(RESET_KEY).ends_with("+R"));
    }
}
