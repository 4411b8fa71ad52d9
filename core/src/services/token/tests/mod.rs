//! Tests for token service

#[cfg(test)]
mod security_tests;
