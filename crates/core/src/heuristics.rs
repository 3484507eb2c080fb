use crate::inference::infer_tool_need;
use oasis_tasks::{NewTask, Priority};

pub const MAX_TITLE_CHARS: usize = 70;
const ELLIPSIS: char = '…';

const PRIORITY_RULES: &[(Priority, &[&str])] = &[
    (Priority::P1, &["urgente", "emergencia", "ahora"]),
    (Priority::P2, &["hoy", "rápido"]),
];

pub fn guess_priority(text: &str) -> Priority {
    let text = text.to_lowercase();
    PRIORITY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(priority, _)| *priority)
        .unwrap_or_default()
}

fn guess_title(text: &str) -> String {
    let title = text.trim();
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut short: String = title.chars().take(MAX_TITLE_CHARS).collect();
        short.push(ELLIPSIS);
        short
    } else {
        title.to_string()
    }
}

/// Derives task fields from a chat message: priority from urgency words,
/// a bounded title, and a note naming the required tool if any.
pub fn smart_task_from_text(text: &str) -> NewTask {
    let notes = match infer_tool_need(text) {
        Some(tool) => format!("Requiere tool: {}", tool),
        None => String::new(),
    };

    NewTask {
        title: guess_title(text),
        priority: guess_priority(text),
        notes,
    }
}
