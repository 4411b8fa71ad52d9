pub mod error_handler;

pub use error_handler::{token_error_response, validation_error_response};
