//! # ScholarMatch Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the chatbot core and
//! the command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! ## Usage
//!
//! ```rust
//! use scholarmatch::core::config; // For loading configuration
//! use scholarmatch::core::error::{ChatError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
