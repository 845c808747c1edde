//! # Conversation Controller
//!
//! File: cli/src/chatbot/controller.rs
//!
//! ## Overview
//!
//! Owns the conversation log and turns user submissions into delayed bot
//! replies:
//!
//! 1. `submit` appends the user message, clears the draft and starts typing.
//! 2. `begin_typing` shows a placeholder and schedules the reply.
//! 3. `resolve` (called by the scheduler's owner once the delay elapses)
//!    swaps the placeholder for the classified canned reply and enforces
//!    capacity.
//!
//! Overlapping submissions are not serialized. Each one gets its own
//! placeholder and its own scheduled reply, and replies land in the order their
//! delays expire.
//!
//! ## Ownership
//!
//! The controller is a single-owner value; every operation takes `&mut self`.
//! To drive it from concurrent code, keep it inside one task and send it work
//! (see `TokioScheduler`).
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use scholarmatch::chatbot::{Controller, LogEvent, VirtualScheduler};
//! use scholarmatch::core::config::ChatSettings;
//!
//! let settings = ChatSettings::default();
//! let mut chat = Controller::new(&settings, VirtualScheduler::new(), Vec::<LogEvent>::new());
//! chat.submit("hello");
//! for reply in chat.scheduler_mut().advance(settings.typing_delay()) {
//!     chat.resolve(reply);
//! }
//! assert_eq!(chat.log().len(), 2);
//! ```
//!
use std::time::Duration;

use tracing::{debug, trace};

use super::classifier::classify;
use super::log::ConversationLog;
use super::message::{LogEvent, OutputSink, Sender};
use super::scheduler::{PendingReply, Scheduler};
use crate::core::config::ChatSettings;

pub struct Controller<S, O> {
    log: ConversationLog,
    scheduler: S,
    sink: O,
    typing_delay: Duration,
    draft: String,
}

impl<S, O> Controller<S, O>
where
    S: Scheduler,
    O: OutputSink,
{
    pub fn new(settings: &ChatSettings, scheduler: S, sink: O) -> Self {
        Self {
            log: ConversationLog::with_capacity(settings.max_messages),
            scheduler,
            sink,
            typing_delay: settings.typing_delay(),
            draft: String::new(),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the pending input buffer.
    pub fn set_draft(&mut self, text: &str) {
        self.draft.clear();
        self.draft.push_str(text);
    }

    /// Submits the current draft. See `submit`.
    pub fn submit_draft(&mut self) -> Option<u64> {
        let text = std::mem::take(&mut self.draft);
        let accepted = self.submit(&text);
        if accepted.is_none() {
            // Whitespace-only drafts stay in the input box, as on the page.
            self.draft = text;
        }
        accepted
    }

    /// Appends a user message and starts the typing delay for its reply.
    ///
    /// Returns the new message's sequence number, or `None` (and changes
    /// nothing) if `text` is empty after trimming.
    pub fn submit(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            trace!("Ignoring empty submission");
            return None;
        }
        let message = self.log.push(Sender::User, text);
        let sequence = message.sequence();
        self.sink.notify(&LogEvent::Appended(message));
        self.enforce_capacity();
        self.draft.clear();
        self.begin_typing(text.to_string());
        Some(sequence)
    }

    fn begin_typing(&mut self, text: String) {
        let typing = self.log.add_placeholder();
        self.sink.notify(&LogEvent::TypingStarted(typing));
        debug!(?typing, delay = ?self.typing_delay, "bot typing");
        self.scheduler
            .schedule_after(self.typing_delay, PendingReply { typing, text });
    }

    /// Replaces the reply's typing placeholder with the canned answer.
    pub fn resolve(&mut self, reply: PendingReply) {
        if self.log.remove_placeholder(reply.typing) {
            self.sink.notify(&LogEvent::TypingCleared(reply.typing));
        }
        let category = classify(&reply.text);
        debug!(%category, "resolved reply");
        let message = self.log.push(Sender::Bot, category.reply());
        self.sink.notify(&LogEvent::Appended(message));
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        for message in self.log.evict_overflow() {
            trace!(sequence = message.sequence(), "evicted message");
            self.sink.notify(&LogEvent::Evicted(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::classifier::ResponseCategory;
    use crate::chatbot::message::{LogEntry, Message};
    use crate::chatbot::scheduler::VirtualScheduler;

    type TestController = Controller<VirtualScheduler, Vec<LogEvent>>;

    fn controller(typing_delay_ms: u64, max_messages: usize) -> TestController {
        let settings = ChatSettings {
            typing_delay_ms,
            max_messages,
        };
        Controller::new(&settings, VirtualScheduler::new(), Vec::new())
    }

    /// Advances virtual time and resolves every reply that came due.
    fn advance(chat: &mut TestController, ms: u64) -> usize {
        let due = chat.scheduler_mut().advance(Duration::from_millis(ms));
        let count = due.len();
        for reply in due {
            chat.resolve(reply);
        }
        count
    }

    fn texts(chat: &TestController) -> Vec<(Sender, String)> {
        chat.log()
            .messages()
            .map(|m| (m.sender(), m.text().to_string()))
            .collect()
    }

    #[test]
    fn empty_submissions_are_ignored() {
        let mut chat = controller(500, 50);
        assert_eq!(chat.submit(""), None);
        assert_eq!(chat.submit("   "), None);
        assert_eq!(chat.submit("\n\t"), None);

        assert!(chat.log().is_empty());
        assert_eq!(chat.log().typing_count(), 0);
        assert!(chat.sink().is_empty());
        assert_eq!(chat.scheduler_mut().pending(), 0);
    }

    #[test]
    fn greeting_arrives_after_typing_delay() {
        let mut chat = controller(500, 50);
        assert_eq!(chat.submit("hi"), Some(0));

        // Placeholder shows immediately, reply is not there yet.
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.log().typing_count(), 1);
        assert!(chat.log().entries().last().unwrap().is_typing());

        assert_eq!(advance(&mut chat, 499), 0);
        assert_eq!(chat.log().len(), 1);

        assert_eq!(advance(&mut chat, 1), 1);
        assert_eq!(chat.log().typing_count(), 0);
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "hi".to_string()),
                (Sender::Bot, ResponseCategory::Greeting.reply().to_string()),
            ]
        );

        let events = chat.sink();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], LogEvent::Appended(m) if m.sender() == Sender::User));
        assert!(matches!(events[1], LogEvent::TypingStarted(_)));
        assert!(matches!(events[2], LogEvent::TypingCleared(_)));
        assert!(matches!(&events[3], LogEvent::Appended(m) if m.sender() == Sender::Bot));
    }

    #[test]
    fn submitted_text_is_trimmed() {
        let mut chat = controller(0, 50);
        chat.submit("  when is the deadline?  ");
        advance(&mut chat, 0);
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "when is the deadline?".to_string()),
                (Sender::Bot, ResponseCategory::Deadlines.reply().to_string()),
            ]
        );
    }

    #[test]
    fn draft_is_cleared_on_submit() {
        let mut chat = controller(500, 50);
        chat.set_draft("   ");
        assert_eq!(chat.submit_draft(), None);
        assert_eq!(chat.draft(), "   ");

        chat.set_draft("how do I apply?");
        assert_eq!(chat.draft(), "how do I apply?");
        assert_eq!(chat.submit_draft(), Some(0));
        assert_eq!(chat.draft(), "");

        chat.set_draft("half typed");
        chat.submit("income limits?");
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn interleaved_submissions_resolve_independently_in_expiry_order() {
        let mut chat = controller(500, 50);
        chat.submit("hello");
        advance(&mut chat, 200);
        chat.submit("what is the deadline");
        assert_eq!(chat.log().typing_count(), 2);

        assert_eq!(advance(&mut chat, 300), 1);
        assert_eq!(chat.log().typing_count(), 1);
        assert_eq!(advance(&mut chat, 200), 1);
        assert_eq!(chat.log().typing_count(), 0);

        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "hello".to_string()),
                (Sender::User, "what is the deadline".to_string()),
                (Sender::Bot, ResponseCategory::Greeting.reply().to_string()),
                (Sender::Bot, ResponseCategory::Deadlines.reply().to_string()),
            ]
        );
    }

    #[test]
    fn simultaneous_submissions_keep_submission_order() {
        let mut chat = controller(500, 50);
        chat.submit("tell me a joke");
        chat.submit("my parents never went to college");
        assert_eq!(advance(&mut chat, 500), 2);

        let bot: Vec<_> = chat
            .log()
            .messages()
            .filter(|m| m.sender() == Sender::Bot)
            .map(Message::text)
            .collect();
        assert_eq!(
            bot,
            [
                ResponseCategory::Default.reply(),
                ResponseCategory::FirstGen.reply()
            ]
        );
    }

    #[test]
    fn capacity_evicts_oldest_messages() {
        let max = 4;
        let mut chat = controller(0, max);
        for i in 0..3 {
            chat.submit(&format!("question {i}"));
            advance(&mut chat, 0);
        }

        assert_eq!(chat.log().len(), max);
        let remaining = texts(&chat);
        assert!(remaining.iter().all(|(_, t)| t != "question 0"));
        assert_eq!(
            remaining.last().unwrap(),
            &(Sender::Bot, ResponseCategory::Default.reply().to_string())
        );
        assert_eq!(remaining[0], (Sender::User, "question 1".to_string()));

        let evicted: Vec<_> = chat
            .sink()
            .iter()
            .filter_map(|e| match e {
                LogEvent::Evicted(m) => Some(m.sequence()),
                _ => None,
            })
            .collect();
        assert_eq!(evicted, [0, 1]);
    }

    #[test]
    fn eviction_skips_pending_placeholders() {
        let mut chat = controller(500, 1);
        chat.submit("hi");
        chat.submit("hey");
        // Capacity one: the first user message has been evicted already.
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.log().typing_count(), 2);

        advance(&mut chat, 500);
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.log().typing_count(), 0);
        assert!(chat
            .log()
            .entries()
            .all(|entry| matches!(entry, LogEntry::Message(m) if m.sender() == Sender::Bot)));
    }
}
