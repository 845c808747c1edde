//! # Classify Command
//!
//! File: cli/src/commands/classify.rs
//!
//! Prints the response category chosen for a message, followed by the canned
//! reply the assistant would send:
//!
//! ```bash
//! $ scholarmatch classify am I eligible
//! eligibility
//! Eligibility requirements vary by scholarship, ...
//! ```
//!
use anyhow::anyhow;
use clap::Parser;
use scholarmatch::chatbot::classify;
use scholarmatch::core::error::{ChatError, Result};
use tracing::debug;

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// The message to classify. Multiple words are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,
}

pub fn handle_classify(args: ClassifyArgs) -> Result<()> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(anyhow!(ChatError::ArgumentParsing(
            "message text cannot be empty".to_string()
        )));
    }
    let category = classify(&text);
    debug!(%category, "classified {:?}", text);
    println!("{}", category);
    println!("{}", category.reply());
    Ok(())
}
