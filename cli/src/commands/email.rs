//! # Check Email Command
//!
//! File: cli/src/commands/email.rs
//!
//! Validates the shape of an email address, e.g. before a newsletter signup.
//! Exits non-zero with `ChatError::InvalidEmail` when it does not look valid.
//!
use clap::Parser;
use scholarmatch::core::error::Result;
use scholarmatch::page::{analytics, email};

#[derive(Parser, Debug)]
pub struct CheckEmailArgs {
    /// The email address to check.
    pub address: String,
}

pub fn handle_check_email(args: CheckEmailArgs) -> Result<()> {
    let result = email::validate_email(&args.address);
    analytics::log_event(
        "email_checked",
        &[("valid", if result.is_ok() { "true" } else { "false" })],
    );
    result?;
    println!("valid: {}", args.address);
    Ok(())
}
