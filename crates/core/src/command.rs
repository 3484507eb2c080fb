/// A slash command typed into the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Clear,
    Task { payload: String },
    Done { payload: String },
    Unknown { command: String },
}

/// Returns `None` for free text. Otherwise the first space-separated token
/// names the command and the rest, trimmed, is its payload.
pub fn parse_chat_command(text: &str) -> Option<ChatCommand> {
    let raw = text.trim();
    if !raw.starts_with('/') {
        return None;
    }

    let (command, payload) = match raw.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (raw, ""),
    };

    let parsed = match command {
        "/clear" => ChatCommand::Clear,
        "/task" => ChatCommand::Task {
            payload: payload.to_string(),
        },
        "/done" => ChatCommand::Done {
            payload: payload.to_string(),
        },
        other => ChatCommand::Unknown {
            command: other.to_string(),
        },
    };
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text() {
        assert_eq!(parse_chat_command("agendar cita mañana"), None);
        assert_eq!(parse_chat_command("  hola /task"), None);
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(parse_chat_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(
            parse_chat_command("  /task   Enviar reporte  "),
            Some(ChatCommand::Task {
                payload: "Enviar reporte".to_string()
            })
        );
        assert_eq!(
            parse_chat_command("/done cliente"),
            Some(ChatCommand::Done {
                payload: "cliente".to_string()
            })
        );
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(
            parse_chat_command("/task"),
            Some(ChatCommand::Task {
                payload: String::new()
            })
        );
        assert_eq!(
            parse_chat_command("/task    "),
            Some(ChatCommand::Task {
                payload: String::new()
            })
        );
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(
            parse_chat_command("/deploy now"),
            Some(ChatCommand::Unknown {
                command: "/deploy".to_string()
            })
        );
        assert_eq!(
            parse_chat_command("/CLEAR"),
            Some(ChatCommand::Unknown {
                command: "/CLEAR".to_string()
            })
        );
    }
}
