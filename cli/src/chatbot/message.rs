//! # Conversation Messages and Log Events
//!
//! File: cli/src/chatbot/message.rs
//!
//! ## Overview
//!
//! Value types shared by the conversation log, the controller and whatever
//! renders the conversation:
//! - `Message`: an immutable user or bot message with its sequence number
//! - `TypingId`: identifies one transient "bot is typing" placeholder
//! - `LogEvent`: one observable mutation of the log
//! - `OutputSink`: the renderer-facing callback that receives every `LogEvent`
//!
use std::fmt;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("user"),
            Sender::Bot => f.write_str("bot"),
        }
    }
}

/// A real conversation message. Fields are read-only once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    sequence: u64,
}

impl Message {
    pub(crate) fn new(sender: Sender, text: impl Into<String>, sequence: u64) -> Self {
        Self {
            sender,
            text: text.into(),
            sequence,
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Handle for a typing placeholder in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypingId(pub(crate) u64);

/// An entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Message(Message),
    Typing(TypingId),
}

impl LogEntry {
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            LogEntry::Message(message) => Some(message),
            LogEntry::Typing(_) => None,
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self, LogEntry::Typing(_))
    }
}

/// A single mutation of the conversation log, as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A message was appended to the tail.
    Appended(Message),
    /// A typing placeholder was appended to the tail.
    TypingStarted(TypingId),
    /// A typing placeholder was removed.
    TypingCleared(TypingId),
    /// The oldest message was evicted to respect capacity.
    Evicted(Message),
}

/// Receives every log mutation, in the order they happen.
pub trait OutputSink {
    fn notify(&mut self, event: &LogEvent);
}

/// Records events; handy for tests and for replaying a session.
impl OutputSink for Vec<LogEvent> {
    fn notify(&mut self, event: &LogEvent) {
        self.push(event.clone());
    }
}

impl<F> OutputSink for F
where
    F: FnMut(&LogEvent),
{
    fn notify(&mut self, event: &LogEvent) {
        self(event)
    }
}
