//! Learning session analysis handlers.
//!
//! `AnalyzeSessionHandler` does the work; `AnalysisDispatcher` runs it on a
//! background worker fed through a bounded queue.

mod analyze_session;
mod dispatcher;

pub use analyze_session::{AnalyzeSessionCommand, AnalyzeSessionHandler};
pub use dispatcher::{AnalysisDispatcher, AnalysisJob, DispatchError, DEFAULT_QUEUE_CAPACITY};
