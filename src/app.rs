use crate::chat_message::{ChatMessage, MessageMeta};
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;
use log::info;

pub const GREETING: &str = "Hi there! Ask me anything and I'll do my best to help.";

/// Controller state. Constructed once per session; every mutation of the
/// transcript goes through it, behind one lock, so appends stay sequential.
pub struct App {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub chat_scroll: u16,
    pub logs_scroll: u16,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
    pub command_history: Vec<String>,
    pub command_index: Option<usize>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            messages: Vec::new(),
            input: String::new(),
            chat_scroll: 0,
            logs_scroll: 0,
            logs: LogView::new(),
            status_indicator: StatusIndicator::new(),
            command_history: Vec::new(),
            command_index: None,
            should_quit: false,
        }
    }

    /// The one canonical submit path. Trims the input buffer; whitespace-only
    /// input is silently ignored (nothing rendered, nothing sent). Otherwise
    /// appends the user echo, records history, clears the buffer, and turns
    /// the typing indicator on. The caller spawns exactly one send task for
    /// the returned text.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text.clone()));
        self.command_history.push(text.clone());
        self.command_index = None;
        self.input.clear();
        self.scroll_to_bottom();

        self.status_indicator.set_typing(true);
        self.logs.add("sending message to backend");
        info!("user message queued ({} chars)", text.len());

        Some(text)
    }

    /// Appends one bot bubble (reply or error variant).
    pub fn push_bot_reply(&mut self, text: impl Into<String>, meta: MessageMeta) {
        self.messages.push(ChatMessage::bot(text, meta));
        self.scroll_to_bottom();
    }

    /// Appends the fixed greeting, but only onto an empty transcript.
    pub fn push_welcome(&mut self) {
        if !self.messages.is_empty() {
            return;
        }
        self.push_bot_reply(GREETING, MessageMeta::greeting());
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    // The draw pass clamps this back to the real bottom
    fn scroll_to_bottom(&mut self) {
        self.chat_scroll = u16::MAX;
    }

    pub fn history_prev(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        let idx = match self.command_index {
            None => self.command_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.command_index = Some(idx);
        self.input = self.command_history[idx].clone();
    }

    pub fn history_next(&mut self) {
        let Some(idx) = self.command_index else {
            return;
        };
        if idx + 1 < self.command_history.len() {
            self.command_index = Some(idx + 1);
            self.input = self.command_history[idx + 1].clone();
        } else {
            self.command_index = None;
            self.input.clear();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_message::Sender;

    #[test]
    fn whitespace_submission_is_a_no_op() {
        let mut app = App::new();
        app.input = "   \t  ".to_string();

        assert!(app.take_submission().is_none());
        assert!(app.messages.is_empty());
        assert!(!app.status_indicator.is_typing());
    }

    #[test]
    fn submission_echoes_user_and_starts_typing() {
        let mut app = App::new();
        app.input = "  hello there  ".to_string();

        let text = app.take_submission().unwrap();
        assert_eq!(text, "hello there");
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].sender(), Sender::User);
        assert_eq!(app.messages[0].text(), "hello there");
        assert!(app.input.is_empty());
        assert!(app.status_indicator.is_typing());
    }

    #[test]
    fn welcome_only_fires_on_empty_transcript() {
        let mut app = App::new();
        app.push_welcome();
        assert_eq!(app.messages.len(), 1);
        let meta = app.messages[0].meta().unwrap();
        assert_eq!(meta.intent, "greeting");
        assert_eq!(meta.confidence, 1.0);

        app.push_welcome();
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn welcome_skipped_when_messages_exist() {
        let mut app = App::new();
        app.input = "hi".to_string();
        app.take_submission().unwrap();

        app.push_welcome();
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].sender(), Sender::User);
    }

    #[test]
    fn history_recall_walks_backwards_then_forwards() {
        let mut app = App::new();
        for line in ["first", "second", "third"] {
            app.input = line.to_string();
            app.take_submission().unwrap();
        }

        app.history_prev();
        assert_eq!(app.input, "third");
        app.history_prev();
        assert_eq!(app.input, "second");
        app.history_next();
        assert_eq!(app.input, "third");
        app.history_next();
        assert!(app.input.is_empty());
        assert!(app.command_index.is_none());
    }
}
