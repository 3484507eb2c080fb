use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traits::ToolError;

/// The fixed set of capabilities the agent can be gated on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Calendar,
    Sheets,
    Pdf,
    Whatsapp,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Calendar,
        ToolKind::Sheets,
        ToolKind::Pdf,
        ToolKind::Whatsapp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Calendar => "calendar",
            ToolKind::Sheets => "sheets",
            ToolKind::Pdf => "pdf",
            ToolKind::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calendar" => Ok(ToolKind::Calendar),
            "sheets" => Ok(ToolKind::Sheets),
            "pdf" => Ok(ToolKind::Pdf),
            "whatsapp" => Ok(ToolKind::Whatsapp),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// One enable flag per tool, persisted as `{ "calendar": true, ... }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolFlags {
    pub calendar: bool,
    pub sheets: bool,
    pub pdf: bool,
    pub whatsapp: bool,
}

impl ToolFlags {
    pub fn is_enabled(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Calendar => self.calendar,
            ToolKind::Sheets => self.sheets,
            ToolKind::Pdf => self.pdf,
            ToolKind::Whatsapp => self.whatsapp,
        }
    }

    pub fn set(&mut self, kind: ToolKind, enabled: bool) {
        let slot = match kind {
            ToolKind::Calendar => &mut self.calendar,
            ToolKind::Sheets => &mut self.sheets,
            ToolKind::Pdf => &mut self.pdf,
            ToolKind::Whatsapp => &mut self.whatsapp,
        };
        *slot = enabled;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToolKind, bool)> + '_ {
        ToolKind::ALL.into_iter().map(|kind| (kind, self.is_enabled(kind)))
    }
}

impl Default for ToolFlags {
    fn default() -> Self {
        Self {
            calendar: true,
            sheets: true,
            pdf: true,
            whatsapp: false,
        }
    }
}
