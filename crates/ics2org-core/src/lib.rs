//! Shared configuration and constants for the converter.

pub mod config;
pub mod constants;
pub mod error;

pub use self::config::{load_config, Settings};
pub use self::error::{CoreError, CoreResult};
