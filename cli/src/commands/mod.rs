//! # ScholarMatch Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the CLI. Each command
//! defines its own Clap arguments struct and a handler function that the
//! entry point (`main.rs`) routes to.
//!
//! ## Commands
//!
//! - `chat`: Interactive terminal front end for the conversation controller
//! - `classify`: One-shot classification of a message
//! - `email`: The `check-email` validation command
//!

/// Interactive chat session. Drives the controller with tokio timers.
pub mod chat;
/// One-shot message classification.
pub mod classify;
/// Email address validation.
pub mod email;
