//! # Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! The terminal front end for the conversation controller. Each line read
//! from stdin is submitted as a user message. Replies are revealed after the
//! configured typing delay by a `TokioScheduler`, and everything the
//! controller does is rendered through `TerminalSink`.
//!
//! ## Architecture
//!
//! The controller lives on this task only. Stdin lines and due replies are
//! multiplexed with `tokio::select!`, so the log is never touched from
//! anywhere else. When the user leaves (`bye`, `quit`, `exit` or EOF), the
//! replies still in flight are awaited and printed before the session ends.
//! A debounced `chat_idle` analytics event fires once the user has gone quiet
//! for `IDLE_EVENT_DELAY` after their last message.
//!
//! ## Examples
//!
//! ```bash
//! scholarmatch chat
//! scholarmatch chat --typing-delay-ms 0 --max-messages 10
//! echo "am I eligible?" | scholarmatch chat
//! ```
//!
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use scholarmatch::chatbot::{Controller, LogEvent, OutputSink, Sender, TokioScheduler};
use scholarmatch::core::config::{self, ConfigOverrides};
use scholarmatch::core::error::Result;
use scholarmatch::page::analytics;
use scholarmatch::page::debounce::Debouncer;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const BOT_NAME: &str = "Scholar";
const IDLE_EVENT_DELAY: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Read settings from this TOML file instead of the user/project files.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Milliseconds the assistant "types" before each reply.
    #[arg(long)]
    pub typing_delay_ms: Option<u64>,

    /// Number of messages kept before the oldest are dropped.
    #[arg(long)]
    pub max_messages: Option<usize>,
}

impl ChatArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            typing_delay_ms: self.typing_delay_ms,
            max_messages: self.max_messages,
        }
    }
}

/// Renders log events as plain terminal lines.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn render(&mut self, event: &LogEvent) -> io::Result<()> {
        match event {
            // The user's own line is already on screen.
            LogEvent::Appended(message) if message.sender() == Sender::User => Ok(()),
            LogEvent::Appended(message) => writeln!(self.out, "{BOT_NAME}: {}", message.text()),
            LogEvent::TypingStarted(_) => writeln!(self.out, "{BOT_NAME} is typing..."),
            LogEvent::TypingCleared(_) => Ok(()),
            LogEvent::Evicted(message) => {
                debug!(sequence = message.sequence(), "Dropped oldest message from history");
                Ok(())
            }
        }?;
        self.out.flush()
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn notify(&mut self, event: &LogEvent) {
        if let Err(e) = self.render(event) {
            warn!("Failed to write chat output: {}", e);
        }
    }
}

/// Restarts the quiet-period timer after the message numbered `sequence`.
fn arm_idle_event(idle: &mut Debouncer, sequence: u64) {
    idle.call(move || {
        let sequence = sequence.to_string();
        analytics::log_event("chat_idle", &[("last_sequence", sequence.as_str())]);
    });
}

fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    ["bye", "quit", "exit"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
}

pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let config = config::load_config(&args.overrides())?;
    info!("Effective chat settings: {:?}", config.chat);

    let (scheduler, mut replies) = TokioScheduler::channel();
    let mut chat = Controller::new(&config.chat, scheduler, TerminalSink::new(io::stdout()));
    analytics::log_event("chat_opened", &[]);

    println!("Chat with the ScholarMatch assistant! Type 'bye' to quit.");

    let mut idle = Debouncer::new(IDLE_EVENT_DELAY);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    break;
                };
                if is_exit_command(&line) {
                    break;
                }
                chat.set_draft(&line);
                if let Some(sequence) = chat.submit_draft() {
                    let seq = sequence.to_string();
                    analytics::log_event("message_sent", &[("sequence", seq.as_str())]);
                    arm_idle_event(&mut idle, sequence);
                }
            }
            Some(reply) = replies.recv() => chat.resolve(reply),
        }
    }

    // Every scheduled reply is delivered, even after the user leaves.
    while chat.log().typing_count() > 0 {
        match replies.recv().await {
            Some(reply) => chat.resolve(reply),
            None => break,
        }
    }

    let kept = chat.log().len().to_string();
    analytics::log_event("chat_closed", &[("messages", kept.as_str())]);
    println!("{BOT_NAME}: Goodbye!");
    Ok(())
}
