//! docqa core library.
//!
//! Foundational utilities shared by every docqa crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration loading
//! - Text normalization

pub mod config;
pub mod error;
pub mod logging;
pub mod text;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use text::normalize;
