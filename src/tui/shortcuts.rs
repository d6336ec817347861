//! Centralized keyboard shortcuts.
//!
//! | Action         | Keys                                    |
//! |----------------|-----------------------------------------|
//! | Send           | Enter                                   |
//! | Scroll         | ↑ ↓ PageUp PageDown                     |
//! | History        | Alt+H, Esc+h (Option as meta), Mac chars |
//! | New chat       | Ctrl+N                                  |
//! | Model selector | Alt+M, Esc+m, µ (Option+M Mac)          |
//! | Cancel request | Esc                                     |
//! | Quit           | Ctrl+C                                  |
//!
//! On macOS, Option+key can send:
//! - Esc+key if terminal has "Use option as meta key" enabled
//! - A special character (˙, µ) if Option is in normal mode

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    History,
    NewChat,
    ModelSelector,
    Quit,
}

impl Shortcut {
    const ALL: [Shortcut; 4] = [
        Shortcut::ModelSelector,
        Shortcut::History,
        Shortcut::NewChat,
        Shortcut::Quit,
    ];

    /// Letter used with Alt, or after Esc when Option acts as Meta.
    fn meta_letter(self) -> Option<char> {
        match self {
            Shortcut::History => Some('h'),
            Shortcut::ModelSelector => Some('m'),
            Shortcut::NewChat | Shortcut::Quit => None,
        }
    }

    fn ctrl_letter(self) -> Option<char> {
        match self {
            Shortcut::NewChat => Some('n'),
            Shortcut::Quit => Some('c'),
            Shortcut::History | Shortcut::ModelSelector => None,
        }
    }

    /// Characters Option+key produces on Mac layouts when Option is not Meta
    /// (Option+H is Ì, ˙ or ħ depending on layout; Option+M is µ).
    fn mac_chars(self) -> &'static [char] {
        match self {
            Shortcut::History => &['\u{00CC}', '\u{02D9}', '\u{0127}'],
            Shortcut::ModelSelector => &['\u{00B5}'],
            Shortcut::NewChat | Shortcut::Quit => &[],
        }
    }

    /// Key label and action shown in the bottom bar.
    fn hint(self) -> (&'static str, &'static str) {
        match self {
            Shortcut::History => ("Alt+H", "history"),
            Shortcut::NewChat => ("Ctrl+N", "new"),
            Shortcut::ModelSelector => ("Alt+M", "model"),
            Shortcut::Quit => ("Ctrl+C", "quit"),
        }
    }

    /// Returns the shortcut if the key matches. With `escape_pending` only the
    /// meta letters count (Esc+key from terminals sending Option as Meta).
    pub fn match_key(key: &KeyEvent, escape_pending: bool) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        Self::ALL.into_iter().find(|s| {
            if escape_pending {
                return s.meta_letter() == Some(c);
            }
            (ctrl && s.ctrl_letter() == Some(c))
                || (alt && s.meta_letter() == Some(c))
                || s.mac_chars().contains(&c)
        })
    }

    /// True if key is Escape (cancel, or start of Option+key sequence on some terminals).
    pub fn is_escape(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == KeyCode::Esc
    }
}

/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};

    use super::Shortcut;

    fn hints(
        pairs: impl IntoIterator<Item = (&'static str, &'static str)>,
        key_color: Color,
    ) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (keys, action)) in pairs.into_iter().enumerate() {
            let sep = if i == 0 { "" } else { "  " };
            spans.push(Span::styled(format!("{}{} ", sep, keys), key_color));
            spans.push(Span::raw(action));
        }
        Line::from(spans)
    }

    pub fn bottom_bar(is_waiting: bool) -> Line<'static> {
        if is_waiting {
            hints([("Esc", "cancel"), ("↑↓", "scroll")], Color::Yellow)
        } else {
            let fixed = [("Enter", "send"), ("↑↓", "scroll")];
            hints(
                fixed.into_iter().chain(Shortcut::ALL.map(Shortcut::hint)),
                Color::DarkGray,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn is_escape() {
        assert!(Shortcut::is_escape(&key(KeyCode::Esc, KeyModifiers::empty())));
        assert!(!Shortcut::is_escape(&key(
            KeyCode::Char('c'),
            KeyModifiers::empty()
        )));
    }

    #[test]
    fn match_quit_ctrl_c() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn match_history_alt_h() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('h'), KeyModifiers::ALT), false),
            Some(Shortcut::History)
        );
    }

    #[test]
    fn match_model_selector_alt_m_and_mac_char() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('m'), KeyModifiers::ALT), false),
            Some(Shortcut::ModelSelector)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('µ'), KeyModifiers::empty()), false),
            Some(Shortcut::ModelSelector)
        );
    }

    #[test]
    fn match_new_chat_ctrl_n() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('n'), KeyModifiers::CONTROL), false),
            Some(Shortcut::NewChat)
        );
    }

    #[test]
    fn match_escape_pending() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('h'), KeyModifiers::empty()), true),
            Some(Shortcut::History)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('m'), KeyModifiers::empty()), true),
            Some(Shortcut::ModelSelector)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('x'), KeyModifiers::empty()), true),
            None
        );
    }

    #[test]
    fn plain_letters_are_not_shortcuts() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('m'), KeyModifiers::empty()), false),
            None
        );
    }

    #[test]
    fn match_key_release_ignored() {
        let key_release = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(Shortcut::match_key(&key_release, false), None);
    }

    #[test]
    fn bottom_bar_lists_shortcuts() {
        let text = |l: ratatui::text::Line| -> String {
            l.spans.iter().map(|s| s.content.as_ref()).collect()
        };
        assert_eq!(
            text(super::labels::bottom_bar(false)),
            "Enter send  ↑↓ scroll  Alt+M model  Alt+H history  Ctrl+N new  Ctrl+C quit"
        );
        assert_eq!(text(super::labels::bottom_bar(true)), "Esc cancel  ↑↓ scroll");
    }
}
