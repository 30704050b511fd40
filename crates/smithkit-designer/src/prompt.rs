//! Modal interaction with the user: text entry, confirmations and alerts.

use std::collections::VecDeque;

/// Host-provided modal dialogs.
pub trait UserPrompt {
    /// Ask for a line of text. `None` means the dialog was cancelled.
    fn prompt_text(&mut self, message: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show an error or notice.
    fn alert(&mut self, message: &str);
}

/// Prompt that replays queued answers and records what it was shown.
///
/// Used by the headless binary and by tests. When the text queue is empty the
/// prompt behaves as cancelled; when the confirm queue is empty it answers
/// with `default_confirm`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    texts: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    pub default_confirm: bool,
    pub prompts: Vec<String>,
    pub alerts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompt that accepts every confirmation.
    pub fn accepting() -> Self {
        Self {
            default_confirm: true,
            ..Self::default()
        }
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.texts.push_back(Some(text.into()));
    }

    pub fn push_cancel(&mut self) {
        self.texts.push_back(None);
    }

    pub fn push_confirm(&mut self, answer: bool) {
        self.confirms.push_back(answer);
    }
}

impl UserPrompt for ScriptedPrompt {
    fn prompt_text(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.texts.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirms.pop_front().unwrap_or(self.default_confirm)
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.alerts.push(message.to_string());
    }
}
