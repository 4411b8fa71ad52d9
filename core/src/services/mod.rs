//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{
    Clock, ManualClock, SystemClock, TokenService, TokenServiceConfig, MAX_LEEWAY_SECONDS,
    MAX_TOKEN_SIZE_BYTES,
};
