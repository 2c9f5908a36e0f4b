//! Centralized error handling for the Pokedex Proxy application
//!
//! This module provides an error handling system that unifies error types
//! across all application layers and provides consistent error reporting.
//!
//! # Error Categories
//!
//! - **Source Errors**: Upstream PokeAPI connectivity and parsing
//! - **Web Errors**: HTTP request/response handling issues
//! - **Configuration Errors**: Invalid or unreadable configuration
//!
//! # Usage
//!
//! ```rust
//! use pokedex_proxy::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     // Function can return any error type that converts to AppError
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Web Results
pub type WebResult<T> = Result<T, WebError>;
