pub mod chat_log;
pub mod compactor;
pub mod event_log;
pub mod state_store;
pub mod types;

pub use chat_log::ChatLog;
pub use compactor::StateCompactor;
pub use event_log::EventLog;
pub use state_store::{export_state, FileStore, MemoryStore, StateStore, StoreError, DEFAULT_STORAGE_KEY};
pub use types::*;
