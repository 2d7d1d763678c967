//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus with bounded history
//! - `AnalysisLogHandler` - Logs background analysis outcomes

mod analysis_log_handler;
mod in_memory;

pub use analysis_log_handler::{
    AnalysisLogHandler, SESSION_ANALYSIS_FAILED_EVENT, SESSION_ANALYZED_EVENT,
};
pub use in_memory::{InMemoryEventBus, DEFAULT_RETENTION};
