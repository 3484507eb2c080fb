use crate::flags::ToolKind;
use crate::simulated::{CalendarTool, PdfTool, SheetsTool, WhatsAppTool};
use crate::traits::{Tool, ToolError, ToolResult};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct ToolRegistry {
    tools: BTreeMap<ToolKind, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the four simulated integrations.
    pub fn simulated() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CalendarTool));
        registry.register(Arc::new(SheetsTool));
        registry.register(Arc::new(PdfTool));
        registry.register(Arc::new(WhatsAppTool));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.kind(), tool);
    }

    pub fn get(&self, kind: ToolKind) -> Option<Arc<dyn Tool>> {
        self.tools.get(&kind).cloned()
    }

    pub fn list(&self) -> Vec<ToolKind> {
        self.tools.keys().copied().collect()
    }

    pub async fn invoke(
        &self,
        kind: ToolKind,
        args: serde_json::Value,
    ) -> Result<ToolResult, ToolError> {
        let tool = self.get(kind).ok_or(ToolError::NotRegistered(kind))?;
        tracing::info!("Invoking tool: {} ({})", tool.name(), tool.description());
        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::simulated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_registry_has_every_tool() {
        let registry = ToolRegistry::simulated();
        assert_eq!(registry.list(), ToolKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_invoke_unregistered() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke(ToolKind::Calendar, serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotRegistered(ToolKind::Calendar)));
    }
}
