//! # Page Utilities (`page`)
//!
//! File: cli/src/page/mod.rs
//!
//! ## Overview
//!
//! Small helpers used by the landing page outside the chatbot itself.
//!
//! - **`analytics`**: Usage events routed through `tracing`.
//! - **`debounce`**: Trailing-edge debouncing on tokio timers.
//! - **`email`**: Email address shape validation.
//!

/// Usage event logging.
pub mod analytics;
/// Trailing-edge debounce.
pub mod debounce;
/// Email validation.
pub mod email;
