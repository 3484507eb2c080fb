//! Keyword rules mapping free text to the tool a task depends on.

use oasis_tools::ToolKind;

/// Ordered rule table. The first rule with any matching keyword wins, so
/// earlier rows take precedence when a text mentions several tools.
pub const TOOL_RULES: &[(ToolKind, &[&str])] = &[
    (ToolKind::Calendar, &["cita", "agenda", "calendar"]),
    (ToolKind::Sheets, &["sheet", "registro", "kpi"]),
    (ToolKind::Pdf, &["pdf", "reporte", "cotización", "quote"]),
    (ToolKind::Whatsapp, &["whatsapp", "mensaje"]),
];

/// Returns the tool required by `text`, matching keywords case-insensitively
/// as plain substrings.
pub fn infer_tool_need(text: &str) -> Option<ToolKind> {
    let text = text.to_lowercase();
    TOOL_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(tool, _)| *tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule() {
        assert_eq!(infer_tool_need("Agendar cita con cliente"), Some(ToolKind::Calendar));
        assert_eq!(infer_tool_need("actualizar KPI semanal"), Some(ToolKind::Sheets));
        assert_eq!(infer_tool_need("Enviar COTIZACIÓN"), Some(ToolKind::Pdf));
        assert_eq!(infer_tool_need("mandar mensaje"), Some(ToolKind::Whatsapp));
        assert_eq!(infer_tool_need("llamar a Juan"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        // mentions both a calendar and a pdf keyword
        assert_eq!(
            infer_tool_need("reporte de la agenda"),
            Some(ToolKind::Calendar)
        );
        assert_eq!(
            infer_tool_need("whatsapp con el pdf"),
            Some(ToolKind::Pdf)
        );
    }

    #[test]
    fn test_substring_matching() {
        // "precita" contains "cita"; matching is not word-bounded
        assert_eq!(infer_tool_need("precita"), Some(ToolKind::Calendar));
        assert_eq!(infer_tool_need("Google Sheets"), Some(ToolKind::Sheets));
    }
}
