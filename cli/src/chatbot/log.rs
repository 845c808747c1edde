//! # Conversation Log
//!
//! File: cli/src/chatbot/log.rs
//!
//! ## Overview
//!
//! An ordered, bounded record of the conversation. Real messages count toward
//! the capacity and are evicted oldest-first once it is exceeded. Typing
//! placeholders share the same ordering so a renderer can show them in place,
//! but they are never counted and never evicted.
//!
//! The log only mutates and reports what changed. Notifying a renderer is the
//! controller's job.
//!
use std::collections::VecDeque;

use tracing::trace;

use super::message::{LogEntry, Message, Sender, TypingId};

#[derive(Debug, Clone)]
pub struct ConversationLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    message_count: usize,
    next_sequence: u64,
    next_typing: u64,
}

impl ConversationLog {
    /// Creates an empty log. A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            message_count: 0,
            next_sequence: 0,
            next_typing: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of real messages (placeholders excluded).
    pub fn len(&self) -> usize {
        self.message_count
    }

    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }

    /// Number of typing placeholders currently shown.
    pub fn typing_count(&self) -> usize {
        self.entries.len() - self.message_count
    }

    /// All entries in conversational order, placeholders included.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Real messages in conversational order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(LogEntry::as_message)
    }

    /// Appends a message with the next sequence number and returns a copy of it.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let message = Message::new(sender, text, self.next_sequence);
        self.next_sequence += 1;
        self.entries.push_back(LogEntry::Message(message.clone()));
        self.message_count += 1;
        trace!(sequence = message.sequence(), %sender, "message appended");
        message
    }

    pub fn add_placeholder(&mut self) -> TypingId {
        let id = TypingId(self.next_typing);
        self.next_typing += 1;
        self.entries.push_back(LogEntry::Typing(id));
        id
    }

    /// Removes the placeholder `id`. Returns false if it was not present.
    pub fn remove_placeholder(&mut self, id: TypingId) -> bool {
        match self
            .entries
            .iter()
            .position(|entry| *entry == LogEntry::Typing(id))
        {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Evicts the oldest messages until the log is within capacity and
    /// returns them oldest-first. The last remaining message is never evicted.
    pub fn evict_overflow(&mut self) -> Vec<Message> {
        let mut evicted = Vec::new();
        while self.message_count > self.capacity && self.message_count > 1 {
            let Some(index) = self.entries.iter().position(|entry| !entry.is_typing()) else {
                break;
            };
            if let Some(LogEntry::Message(message)) = self.entries.remove(index) {
                self.message_count -= 1;
                evicted.push(message);
            }
        }
        evicted
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::with_capacity(50)
    }
}
