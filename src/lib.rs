/// Implemented RL algorithms
pub mod algo;

/// Run configuration
pub mod config;

/// Grid world environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// Policy rendering
pub mod render;

/// Training statistics
pub mod report;

mod error;
mod util;

pub use config::{Config, RunMode};
pub use error::{Error, Result};
