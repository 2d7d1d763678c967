//! HTTP adapter for the chat endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::chat_routes;
