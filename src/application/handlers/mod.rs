//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod advocacy;
pub mod chat;
pub mod learning;

pub use advocacy::{FillTemplateHandler, FillTemplateQuery, ListTemplatesHandler, ListTemplatesQuery};
pub use chat::{
    ChatReply, ChatSettings, SendChatMessageCommand, SendChatMessageHandler, APOLOGY_REPLY,
};
pub use learning::{
    AnalysisDispatcher, AnalysisJob, AnalyzeSessionCommand, AnalyzeSessionHandler,
    DispatchError, DEFAULT_QUEUE_CAPACITY,
};
