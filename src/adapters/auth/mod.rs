//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `supabase` - HS256 access tokens issued by Supabase Auth
//! - `mock` - Test implementation that doesn't require external services

mod mock;
mod supabase;

pub use mock::MockSessionValidator;
pub use supabase::{SupabaseConfig, SupabaseSessionValidator, DEFAULT_AUDIENCE};
