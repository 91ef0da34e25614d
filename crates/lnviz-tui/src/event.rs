//! Terminal event polling

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lnviz_app::{InputKey, Message};
use lnviz_core::prelude::*;

/// Frame interval; a timeout produces a `Tick` so transient edges expire
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convert a crossterm key event into the app's key type
pub fn key_event_to_input(key: KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

/// Map a terminal event to a message. Only key presses are of interest;
/// releases and repeats reported by some terminals are ignored.
fn event_to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    if event::poll(POLL_INTERVAL)? {
        Ok(event_to_message(event::read()?))
    } else {
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(key_event_to_input(key(KeyCode::Char('c'))), Some(InputKey::Char('c')));
    }

    #[test]
    fn test_ctrl_c_conversion() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(ev), Some(InputKey::CharCtrl('c')));
    }

    #[test]
    fn test_shift_letters_stay_plain_chars() {
        let ev = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(ev), Some(InputKey::Char('G')));
    }

    #[test]
    fn test_shift_tab_is_backtab() {
        let ev = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(ev), Some(InputKey::BackTab));
        assert_eq!(key_event_to_input(key(KeyCode::BackTab)), Some(InputKey::BackTab));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(key_event_to_input(key(KeyCode::Up)), Some(InputKey::Up));
        assert_eq!(key_event_to_input(key(KeyCode::Down)), Some(InputKey::Down));
        assert_eq!(key_event_to_input(key(KeyCode::PageUp)), Some(InputKey::PageUp));
        assert_eq!(key_event_to_input(key(KeyCode::PageDown)), Some(InputKey::PageDown));
        assert_eq!(key_event_to_input(key(KeyCode::Home)), Some(InputKey::Home));
        assert_eq!(key_event_to_input(key(KeyCode::End)), Some(InputKey::End));
    }

    #[test]
    fn test_unsupported_keys_ignored() {
        assert_eq!(key_event_to_input(key(KeyCode::Insert)), None);
        assert_eq!(key_event_to_input(key(KeyCode::F(5))), None);
    }

    #[test]
    fn test_key_release_is_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(event_to_message(Event::Key(release)).is_none());

        let press = key(KeyCode::Char('q'));
        assert!(matches!(
            event_to_message(Event::Key(press)),
            Some(Message::Key(InputKey::Char('q')))
        ));
    }

    #[test]
    fn test_non_key_events_dropped() {
        assert!(event_to_message(Event::FocusGained).is_none());
        assert!(event_to_message(Event::Resize(80, 24)).is_none());
    }
}
