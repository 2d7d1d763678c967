//! HTTP adapter for advocacy templates.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::advocacy_routes;
