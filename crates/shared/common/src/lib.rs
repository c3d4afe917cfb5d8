//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling with an HTTP projection for the handler layer
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
