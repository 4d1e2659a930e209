//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto the shared [`UserAction`] signal set.
//! Both game drivers use the same bindings; what a signal means (tick vs.
//! rotate) is the engine's business.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_brick_types::UserAction;

/// Map a key press to a user action.
pub fn handle_key_event(key: KeyEvent) -> Option<UserAction> {
    match key.code {
        KeyCode::Left => Some(UserAction::Left),
        KeyCode::Right => Some(UserAction::Right),
        KeyCode::Up => Some(UserAction::Up),
        KeyCode::Down => Some(UserAction::Down),
        KeyCode::Char(' ') | KeyCode::Enter => Some(UserAction::Action),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UserAction::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UserAction::Pause),
        KeyCode::Esc => Some(UserAction::Terminate),
        _ => None,
    }
}

/// Keys that end the driver loop outright.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(UserAction::Left)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(UserAction::Right)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(UserAction::Up)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(UserAction::Down)
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(UserAction::Start)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(UserAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(UserAction::Action)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(UserAction::Terminate)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('s'))));
    }
}
