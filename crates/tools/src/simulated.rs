//! Stand-ins for the external integrations. Each one only reports what it
//! would have done.

use crate::flags::ToolKind;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

fn simulated(action: &str, message: &str) -> ToolResult {
    ToolResult {
        success: true,
        output: json!({ "action": action, "message": message }),
        error: None,
    }
}

pub struct CalendarTool;

#[async_trait]
impl Tool for CalendarTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Calendar
    }

    fn description(&self) -> &str {
        "Book an appointment in the calendar"
    }

    async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(simulated("simulate-calendar", "Calendar: cita simulada creada."))
    }
}

pub struct SheetsTool;

#[async_trait]
impl Tool for SheetsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Sheets
    }

    fn description(&self) -> &str {
        "Append a record to a spreadsheet"
    }

    async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(simulated("simulate-sheet", "Sheets: registro simulado guardado."))
    }
}

pub struct PdfTool;

#[async_trait]
impl Tool for PdfTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pdf
    }

    fn description(&self) -> &str {
        "Render a report or quote as PDF"
    }

    async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(simulated("simulate-pdf", "PDF: reporte simulado generado."))
    }
}

pub struct WhatsAppTool;

#[async_trait]
impl Tool for WhatsAppTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Whatsapp
    }

    fn description(&self) -> &str {
        "Send a WhatsApp message"
    }

    async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        Ok(simulated("simulate-whatsapp", "WhatsApp: mensaje simulado enviado."))
    }
}
