//! # Core Library
//!
//! Platform-independent core of the reward tracker: configuration, errors,
//! the wallet provider seam, the reward contract gateway, and the view state
//! with the flows that drive it.

pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod session;
pub mod tracker;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use provider::Eip1193;
pub use tracker::{TrackerState, TrackerStore};
