//! Chat history shared between oracle calls.
//!
//! A [`History`] is append-only. Strategies clone the seed (the code and its
//! summary) and decide whether answers are appended to it.

use serde::{Deserialize, Serialize};

use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message, in Ollama's `/api/chat` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    messages: Vec<ChatMessage>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// The context every naming question builds on.
    ///
    /// With a summary this is the summary question and its answer, so the
    /// model sees its own description of the code. Without one the code is
    /// handed over directly.
    #[must_use]
    pub fn seeded(code: &str, summary: Option<&str>) -> Self {
        let mut history = Self::new();
        match summary {
            Some(summary) => {
                history.push(ChatMessage::user(prompts::summary_prompt(code)));
                history.push(ChatMessage::assistant(summary));
            }
            None => history.push(ChatMessage::user(prompts::context_prompt(code))),
        }
        history
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// This history followed by `message`, leaving `self` untouched.
    #[must_use]
    pub fn with(&self, message: ChatMessage) -> Vec<ChatMessage> {
        let mut messages = self.messages.clone();
        messages.push(message);
        messages
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seed_with_summary_is_a_question_and_answer() {
        let history = History::seeded("int f(void);", Some("Does nothing."));
        let roles: Vec<_> = history.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert!(history.messages()[0].content.contains("int f(void);"));
        assert_eq!(history.messages()[1].content, "Does nothing.");
    }

    #[test]
    fn seed_without_summary_carries_the_code() {
        let history = History::seeded("int f(void);", None);
        assert_eq!(history.len(), 1);
        assert!(history.messages()[0].content.contains("int f(void);"));
    }

    #[test]
    fn with_does_not_append() {
        let history = History::seeded("x", None);
        let query = history.with(ChatMessage::user("q"));
        assert_eq!(query.len(), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn serializes_in_wire_shape() {
        let mut history = History::new();
        history.push(ChatMessage::user("hi"));
        history.push(ChatMessage::assistant("hello"));
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
    }
}
