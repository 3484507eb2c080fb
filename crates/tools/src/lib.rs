pub mod flags;
pub mod registry;
pub mod simulated;
pub mod traits;

pub use flags::{ToolFlags, ToolKind};
pub use registry::ToolRegistry;
pub use simulated::{CalendarTool, PdfTool, SheetsTool, WhatsAppTool};
pub use traits::{Tool, ToolError, ToolResult};
