//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (chat, session analysis) are separated from the
//! read-only advocacy template queries.

pub mod handlers;

pub use handlers::{
    // Chat
    ChatReply, ChatSettings, SendChatMessageCommand, SendChatMessageHandler, APOLOGY_REPLY,
    // Learning analysis
    AnalysisDispatcher, AnalysisJob, AnalyzeSessionCommand, AnalyzeSessionHandler,
    DispatchError, DEFAULT_QUEUE_CAPACITY,
    // Advocacy
    FillTemplateHandler, FillTemplateQuery, ListTemplatesHandler, ListTemplatesQuery,
};
