//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Azure OpenAI chat completions, plus a mock
//! - `auth` - Supabase JWT validation, plus a mock
//! - `events` - In-memory event bus and the analysis log subscriber
//! - `http` - axum routes, DTOs and middleware
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod ai;
pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
