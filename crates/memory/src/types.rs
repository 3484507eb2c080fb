use chrono::{DateTime, Utc};
use oasis_tasks::TaskBoard;
use oasis_tools::ToolFlags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chat_log::ChatLog;
use crate::event_log::EventLog;

pub const DEFAULT_AGENT_NAME: &str = "Oasis Agent";
pub const FALLBACK_AGENT_NAME: &str = "Agent";
pub const DEFAULT_AGENT_BRIEF: &str = "Directo, técnico, orientado a resultados.";
pub const GREETING: &str =
    "Online. Dame un objetivo y lo convierto en tareas ejecutables. (Sin drama, con métricas.)";

pub const DEFAULT_CHAT_LIMIT: usize = 120;
pub const DEFAULT_LOG_LIMIT: usize = 300;

/// Maximum retained length of the chat and event sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub chat: usize,
    pub logs: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_LIMIT,
            logs: DEFAULT_LOG_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AutoRun {
    On,
    #[default]
    Off,
}

impl AutoRun {
    pub fn is_on(&self) -> bool {
        matches!(self, AutoRun::On)
    }
}

impl From<bool> for AutoRun {
    fn from(on: bool) -> Self {
        if on {
            AutoRun::On
        } else {
            AutoRun::Off
        }
    }
}

impl fmt::Display for AutoRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AutoRun::On => "on",
            AutoRun::Off => "off",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub agent_name: String,
    #[serde(default)]
    pub agent_brief: String,
    #[serde(default)]
    pub auto_run: AutoRun,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            agent_brief: DEFAULT_AGENT_BRIEF.to_string(),
            auto_run: AutoRun::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    TaskCreate,
    TaskMove,
    TaskDelete,
    AgentRun,
    AgentIdle,
    AgentBlocked,
    AgentDone,
    ChatClear,
    Export,
    LogsReset,
    ToolsUpdate,
    ToolCall,
    SettingsSave,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::TaskCreate => "TASK_CREATE",
            LogKind::TaskMove => "TASK_MOVE",
            LogKind::TaskDelete => "TASK_DELETE",
            LogKind::AgentRun => "AGENT_RUN",
            LogKind::AgentIdle => "AGENT_IDLE",
            LogKind::AgentBlocked => "AGENT_BLOCKED",
            LogKind::AgentDone => "AGENT_DONE",
            LogKind::ChatClear => "CHAT_CLEAR",
            LogKind::Export => "EXPORT",
            LogKind::LogsReset => "LOGS_RESET",
            LogKind::ToolsUpdate => "TOOLS_UPDATE",
            LogKind::ToolCall => "TOOL_CALL",
            LogKind::SettingsSave => "SETTINGS_SAVE",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub ts: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
    #[serde(default = "empty_meta")]
    pub meta: serde_json::Value,
}

fn empty_meta() -> serde_json::Value {
    serde_json::json!({})
}

/// Everything the application persists, as one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppState {
    pub settings: Settings,
    pub tools: ToolFlags,
    pub chat: ChatLog,
    pub tasks: TaskBoard,
    pub logs: EventLog,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            tools: ToolFlags::default(),
            chat: ChatLog::from_messages(vec![ChatMessage::agent(GREETING)]),
            tasks: TaskBoard::new(),
            logs: EventLog::new(),
        }
    }
}
