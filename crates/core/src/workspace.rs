use crate::config::AppConfig;
use crate::schedule::JobQueue;
use oasis_memory::{AppState, ChatMessage, Limits, LogKind};
use oasis_tasks::{NewTask, Task, TaskStatus};
use serde_json::json;
use std::time::Duration;

/// In-memory application state plus pending agent work. Every helper here
/// mutates state and records the matching log entry; none of them persist.
pub struct Workspace {
    pub state: AppState,
    pub jobs: JobQueue,
    limits: Limits,
    execution_delay: Duration,
    auto_run_delay: Duration,
    outbox: Vec<ChatMessage>,
}

impl Workspace {
    pub fn new(state: AppState, config: &AppConfig) -> Self {
        Self {
            state,
            jobs: JobQueue::new(),
            limits: config.limits(),
            execution_delay: config.execution_delay(),
            auto_run_delay: config.auto_run_delay(),
            outbox: Vec::new(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn execution_delay(&self) -> Duration {
        self.execution_delay
    }

    pub fn auto_run_delay(&self) -> Duration {
        self.auto_run_delay
    }

    pub fn auto_run(&self) -> bool {
        self.state.settings.auto_run.is_on()
    }

    /// Appends an agent message to the chat.
    pub fn say(&mut self, text: impl Into<String>) {
        let message = ChatMessage::agent(text);
        self.outbox.push(message.clone());
        self.state.chat.push(message, self.limits.chat);
    }

    /// Appends a user message to the chat.
    pub fn hear(&mut self, text: impl Into<String>) {
        self.state.chat.push(ChatMessage::user(text), self.limits.chat);
    }

    pub fn log(&mut self, kind: LogKind, message: impl Into<String>, meta: serde_json::Value) {
        self.state.logs.record(kind, message, meta, self.limits.logs);
    }

    /// Agent messages produced since the last call.
    pub fn take_outbox(&mut self) -> Vec<ChatMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn create_task(&mut self, new_task: NewTask) -> Task {
        let task = self.state.tasks.create(new_task);
        self.log(
            LogKind::TaskCreate,
            format!("Tarea creada: {}", task.title),
            json!({ "id": task.id, "priority": task.priority.to_string() }),
        );
        task
    }

    pub fn move_task(&mut self, id: &str, status: TaskStatus) -> Option<Task> {
        let task = self.state.tasks.move_to(id, status)?;
        self.log(
            LogKind::TaskMove,
            format!("Tarea movida: {} → {}", task.title, status),
            json!({ "id": task.id }),
        );
        Some(task)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let task = self.state.tasks.delete(id)?;
        self.log(
            LogKind::TaskDelete,
            format!("Tarea eliminada: {}", task.title),
            json!({ "id": task.id }),
        );
        Some(task)
    }

    pub fn reset(&mut self, state: AppState) {
        self.state = state;
        self.jobs.clear();
        self.outbox.clear();
    }
}
