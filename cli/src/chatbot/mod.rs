//! # Chatbot Core (`chatbot`)
//!
//! File: cli/src/chatbot/mod.rs
//!
//! ## Overview
//!
//! The scripted scholarship assistant: a keyword classifier and a conversation
//! controller that reveals canned replies after a simulated typing delay.
//!
//! ## Architecture
//!
//! - **`classifier`**: Pure mapping from text to `ResponseCategory` and its canned reply.
//! - **`message`**: `Message`, `LogEvent` and the renderer-facing `OutputSink` trait.
//! - **`log`**: The bounded `ConversationLog` with typing placeholders.
//! - **`scheduler`**: The `Scheduler` capability with virtual-time and tokio implementations.
//! - **`controller`**: `Controller`, which ties the pieces together.
//!
//! Control flow: `submit` → typing placeholder + scheduled reply → `resolve`
//! → bot message → capacity enforcement. Every log mutation is reported to the
//! injected `OutputSink`.
//!

/// Keyword table, response categories and the `classify` function.
pub mod classifier;
/// Orchestrates submissions, typing placeholders and delayed replies.
pub mod controller;
/// Bounded, ordered conversation log.
pub mod log;
/// Message and event types plus the `OutputSink` trait.
pub mod message;
/// Scheduling capability used for the typing delay.
pub mod scheduler;

pub use classifier::{classify, ResponseCategory};
pub use controller::Controller;
pub use log::ConversationLog;
pub use message::{LogEntry, LogEvent, Message, OutputSink, Sender, TypingId};
pub use scheduler::{PendingReply, Scheduler, TokioScheduler, VirtualScheduler};
