//! HTTP adapters - REST API implementations.
//!
//! Each area has its own routes, DTOs and handlers; `router` assembles
//! them with authentication and the tower-http layers.

pub mod advocacy;
pub mod chat;
pub mod error;
pub mod middleware;
pub mod router;

pub use error::{ApiError, ErrorResponse};
pub use router::{build_router, AppState, RouterSettings};
