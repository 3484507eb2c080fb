use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::ToolKind;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Tool not registered: {0}")]
    NotRegistered(ToolKind),
    #[error("Execution error: {0}")]
    Execution(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: serde_json::Value,
    pub error: Option<String>,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn kind(&self) -> ToolKind;
    fn description(&self) -> &str;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError>;
}
