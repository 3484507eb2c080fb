use crate::types::*;

pub struct StateCompactor;

impl StateCompactor {
    /// Brings a loaded document back within `limits`. Documents written by an
    /// older configuration with larger bounds are trimmed here rather than on
    /// the next append.
    pub fn compact(state: &mut AppState, limits: Limits) -> bool {
        let mut compacted = false;

        let dropped = state.chat.truncate(limits.chat);
        if dropped > 0 {
            tracing::info!("Compacted {} chat messages", dropped);
            compacted = true;
        }

        let dropped = state.logs.truncate(limits.logs);
        if dropped > 0 {
            tracing::info!("Compacted {} log entries", dropped);
            compacted = true;
        }

        compacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compaction_enforces_limits() {
        let mut state = AppState::default();
        for i in 0..50 {
            state.chat.push(ChatMessage::user(format!("msg {}", i)), 1000);
            state
                .logs
                .record(LogKind::ToolCall, format!("log {}", i), json!({}), 1000);
        }

        let compacted = StateCompactor::compact(&mut state, Limits { chat: 10, logs: 20 });

        assert!(compacted);
        assert_eq!(state.chat.len(), 10);
        assert_eq!(state.chat.last().unwrap().text, "msg 49");
        assert_eq!(state.logs.len(), 20);
        assert_eq!(state.logs.latest().unwrap().message, "log 49");
    }

    #[test]
    fn test_compaction_noop_within_limits() {
        let mut state = AppState::default();
        assert!(!StateCompactor::compact(&mut state, Limits::default()));
        assert_eq!(state.chat.len(), 1);
    }
}
