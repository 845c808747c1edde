//! # Keyword Classifier
//!
//! File: cli/src/chatbot/classifier.rs
//!
//! ## Overview
//!
//! Maps free text to a `ResponseCategory` by substring keyword matching.
//! Categories are checked in a fixed priority order and the first one with a
//! matching trigger wins, so `"hi, what are the eligibility requirements?"`
//! is a greeting. Anything unmatched falls through to `Default`.
//!
//! Matching is plain substring containment on the lower-cased input, so short
//! triggers also fire inside longer words (`"hi"` matches `"this"`).
//!
use std::fmt;
use std::str::FromStr;

use crate::core::error::ChatError;

/// A canned-reply bucket selected by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCategory {
    Greeting,
    Eligibility,
    Application,
    Deadlines,
    FirstGen,
    Income,
    Default,
}

/// Trigger substrings per category, in priority order.
const KEYWORD_TABLE: [(ResponseCategory, &[&str]); 6] = [
    (ResponseCategory::Greeting, &["hello", "hi", "hey"]),
    (
        ResponseCategory::Eligibility,
        &["eligible", "qualify", "requirements"],
    ),
    (
        ResponseCategory::Application,
        &["apply", "application", "needed"],
    ),
    (ResponseCategory::Deadlines, &["deadline", "when", "date"]),
    (
        ResponseCategory::FirstGen,
        &["first-gen", "first gen", "parents"],
    ),
    (ResponseCategory::Income, &["income", "poor", "financial"]),
];

impl ResponseCategory {
    /// Every category, keyword-matched ones first in priority order.
    pub const ALL: [ResponseCategory; 7] = [
        ResponseCategory::Greeting,
        ResponseCategory::Eligibility,
        ResponseCategory::Application,
        ResponseCategory::Deadlines,
        ResponseCategory::FirstGen,
        ResponseCategory::Income,
        ResponseCategory::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCategory::Greeting => "greeting",
            ResponseCategory::Eligibility => "eligibility",
            ResponseCategory::Application => "application",
            ResponseCategory::Deadlines => "deadlines",
            ResponseCategory::FirstGen => "firstgen",
            ResponseCategory::Income => "income",
            ResponseCategory::Default => "default",
        }
    }

    /// The canned reply the bot sends for this category.
    pub fn reply(self) -> &'static str {
        match self {
            ResponseCategory::Greeting => {
                "Hi! 👋 I'm your ScholarMatch AI Assistant. Ask me anything about scholarships!"
            }
            ResponseCategory::Eligibility => {
                "Eligibility requirements vary by scholarship, but common ones include GPA, \
                 income level, field of study, and essay submission. Tell me more about your \
                 background!"
            }
            ResponseCategory::Application => {
                "Great question! Most scholarships require: transcripts, essays, recommendation \
                 letters, and sometimes a FAFSA form. I can help you prepare!"
            }
            ResponseCategory::Deadlines => {
                "Scholarship deadlines vary—some are rolling (ongoing), while others have \
                 specific dates. The earlier you apply, the better your chances!"
            }
            ResponseCategory::FirstGen => {
                "First-gen students often qualify for special scholarships! Many organizations \
                 offer support specifically for students whose parents didn't attend college."
            }
            ResponseCategory::Income => {
                "Many scholarships are need-based and support low-income students. Some are \
                 merit-based (grades/achievements). We can find both!"
            }
            ResponseCategory::Default => {
                "That's a great question! For more specific help, try exploring our scholarship \
                 finder to see personalized recommendations."
            }
        }
    }

    /// Trigger substrings for this category. `Default` has none.
    pub fn keywords(self) -> &'static [&'static str] {
        KEYWORD_TABLE
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseCategory {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChatError::ArgumentParsing(format!("unknown response category '{s}'")))
    }
}

/// Classifies `input` into a response category.
pub fn classify(input: &str) -> ResponseCategory {
    let lowered = input.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(ResponseCategory::Default)
}
