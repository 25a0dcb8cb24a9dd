//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Durable favorites slot (favorites_storage)
//! - HTTP server setup (server)
//! - Application state (state)

pub mod config;
pub mod favorites_storage;
pub mod server;
pub mod state;

pub use favorites_storage::{JsonFileStorage, MemoryStorage};
pub use state::AppState;
