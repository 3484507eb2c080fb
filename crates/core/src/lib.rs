pub mod agent_engine;
pub mod command;
pub mod config;
pub mod controller;
pub mod heuristics;
pub mod inference;
pub mod schedule;
pub mod workspace;

pub use agent_engine::{AgentEngine, ResolveOutcome, RunOutcome};
pub use command::{parse_chat_command, ChatCommand};
pub use config::{AppConfig, ConfigError};
pub use controller::{Controller, ControllerError, Kpis};
pub use heuristics::{guess_priority, smart_task_from_text};
pub use inference::{infer_tool_need, TOOL_RULES};
pub use schedule::{AgentJob, JobQueue};
pub use workspace::Workspace;
