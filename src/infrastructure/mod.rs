//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite repositories for characters and the battle log
//! - HTTP: REST API routes
//! - Random: thread-rng adapter for the critical-hit roll
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod random;
pub mod state;
