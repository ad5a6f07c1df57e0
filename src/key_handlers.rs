use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Dispatches one key event against the controller. Returns the text to
/// send when the event triggered a submission; every trigger funnels into
/// `App::take_submission`, so there is exactly one submit path.
pub fn handle_chat_key(key: KeyEvent, app: &mut App) -> Option<String> {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Enter => {
            // Shift+Enter inserts a line break instead of submitting
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.input.push('\n');
            } else {
                return app.take_submission();
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => app.history_prev(),
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => app.history_next(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
    None
}
