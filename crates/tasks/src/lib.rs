use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Invalid task status: {0} (expected backlog, doing or done)")]
    InvalidStatus(String),
    #[error("Invalid priority: {0} (expected P1, P2 or P3)")]
    InvalidPriority(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Backlog,
    Doing,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Backlog, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(TaskStatus::Backlog),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(TaskError::InvalidStatus(other.to_string())),
        }
    }
}

/// Task urgency. Declaration order is significant: `P1` sorts first.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Priority {
    P1,
    P2,
    #[default]
    P3,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            "P3" => Ok(Priority::P3),
            other => Err(TaskError::InvalidPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a task, either from the task form or
/// derived from chat text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub notes: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardCounts {
    pub total: usize,
    pub pending: usize,
    pub done: usize,
}

/// Ordered task collection. Newest tasks sit at the front; column views keep
/// that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn create(&mut self, new_task: NewTask) -> Task {
        let now = Utc::now();
        let task = Task {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: new_task.title.trim().to_string(),
            priority: new_task.priority,
            notes: new_task.notes.trim().to_string(),
            status: TaskStatus::Backlog,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(0, task.clone());

        tracing::info!("Created task {}: {}", task.id, task.title);
        task
    }

    /// Any status may follow any other. Returns the updated record, or `None`
    /// when the id is unknown.
    pub fn move_to(&mut self, id: &str, status: TaskStatus) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.status = status;
        task.updated_at = Utc::now();

        tracing::debug!("Moved task {} to {}", task.id, status);
        Some(task.clone())
    }

    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(idx);

        tracing::info!("Deleted task {}", task.id);
        Some(task)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn by_status(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// The task the agent should pick up next: the first backlog task, or
    /// failing that the first one already in progress.
    pub fn next_runnable(&self) -> Option<&Task> {
        self.by_status(TaskStatus::Backlog)
            .next()
            .or_else(|| self.by_status(TaskStatus::Doing).next())
    }

    /// First task not yet done whose title contains `needle`, ignoring case.
    pub fn find_open_by_title(&self, needle: &str) -> Option<&Task> {
        let needle = needle.to_lowercase();
        self.tasks
            .iter()
            .find(|t| t.status != TaskStatus::Done && t.title.to_lowercase().contains(&needle))
    }

    pub fn counts(&self) -> BoardCounts {
        let done = self.by_status(TaskStatus::Done).count();
        BoardCounts {
            total: self.tasks.len(),
            pending: self.tasks.len() - done,
            done,
        }
    }
}
