//! # ScholarMatch Assistant Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! The library half of the `scholarmatch` crate. It holds everything the
//! terminal front end (`main.rs`) drives, so that integration tests and other
//! front ends can use it directly:
//!
//! - `chatbot`: keyword classifier, conversation log and controller
//! - `core`: configuration and error types
//! - `page`: landing-page utilities (email validation, debounce, analytics)
//!
pub mod chatbot;
pub mod core;
pub mod page;
