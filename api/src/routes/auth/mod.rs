//! Authentication route handlers
//!
//! - Access token refresh
//! - Current identity lookup for authenticated callers

pub mod me;
pub mod refresh;

pub use me::me;
pub use refresh::refresh_token;
