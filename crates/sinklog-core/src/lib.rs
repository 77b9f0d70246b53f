//! sinklog core - severity levels, logger settings, configuration, and errors

pub mod config;
pub mod constants;
pub mod error;
pub mod level;
pub mod types;

pub use config::*;
pub use constants::*;
pub use error::{Error, Result};
pub use level::*;
pub use types::*;
