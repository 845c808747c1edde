//! # ScholarMatch Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used by the ambient layers of the
//! application (configuration, CLI commands, page utilities). The chatbot core
//! itself has no failure modes: empty submissions are ignored and the
//! classifier always produces a category.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ChatError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! use anyhow::anyhow;
//! use scholarmatch::core::error::{ChatError, Result};
//!
//! fn check(max_messages: usize) -> Result<()> {
//!     if max_messages == 0 {
//!         return Err(anyhow!(ChatError::Config(
//!             "max_messages must be at least 1".to_string()
//!         )));
//!     }
//!     Ok(())
//! }
//! # assert!(check(0).is_err());
//! ```
//!
use thiserror::Error;

/// Custom error type for the ScholarMatch application.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("'{address}' is not a valid email address.")]
    InvalidEmail { address: String },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
