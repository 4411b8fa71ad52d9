//! # Tokenward API
//!
//! Actix-web surface over the token service: bearer authentication
//! middleware, the refresh endpoint and process bootstrap helpers.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
