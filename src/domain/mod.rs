//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `twin` - The cognitive profile and its neural patterns
//! - `learning` - Session records, session analysis, and insights
//! - `prompt` - Mode system prompts, adaptive modifiers, and fallback replies
//! - `advocacy` - Advocacy template catalog and filling

pub mod advocacy;
pub mod foundation;
pub mod learning;
pub mod prompt;
pub mod twin;
