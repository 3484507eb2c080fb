use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};

/// Conversation transcript, oldest first. Appends drop the oldest messages
/// once the limit is exceeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: ChatMessage, limit: usize) {
        self.messages.push(message);
        self.truncate(limit);
    }

    /// Keeps the newest `limit` messages. Returns how many were dropped.
    pub fn truncate(&mut self, limit: usize) -> usize {
        let excess = self.messages.len().saturating_sub(limit);
        if excess > 0 {
            self.messages.drain(..excess);
        }
        excess
    }

    /// Replaces the whole transcript with a single message.
    pub fn reset(&mut self, message: ChatMessage) {
        self.messages.clear();
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_push_keeps_newest() {
        let mut chat = ChatLog::new();
        for i in 0..10 {
            chat.push(ChatMessage::user(format!("msg {}", i)), 4);
        }

        assert_eq!(chat.len(), 4);
        assert_eq!(chat.messages()[0].text, "msg 6");
        assert_eq!(chat.last().unwrap().text, "msg 9");
    }

    #[test]
    fn test_reset_leaves_single_message() {
        let mut chat = ChatLog::new();
        chat.push(ChatMessage::user("hola"), 120);
        chat.push(ChatMessage::agent("hola"), 120);

        chat.reset(ChatMessage::agent("limpio"));
        assert_eq!(chat.len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Agent);
    }
}
