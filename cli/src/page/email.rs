//! # Email Validation
//!
//! File: cli/src/page/email.rs
//!
//! A loose shape check (`something@something.something`, no whitespace and no
//! extra `@`), not RFC 5322 validation.
//!
use std::sync::LazyLock;

use anyhow::anyhow;
use regex::Regex;

use crate::core::error::{ChatError, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Like `is_valid_email`, but fails with `ChatError::InvalidEmail`.
pub fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(anyhow!(ChatError::InvalidEmail {
            address: email.to_string(),
        }))
    }
}
