//! # Analytics Events
//!
//! File: cli/src/page/analytics.rs
//!
//! Usage events are emitted as `tracing` events on the `analytics` target.
//! No analytics service is integrated; route the target with `RUST_LOG`
//! (e.g. `RUST_LOG=analytics=info`) or a subscriber layer to collect them.
//!
use tracing::info;

pub const TARGET: &str = "analytics";

/// Logs a named event with optional key/value data.
pub fn log_event(name: &str, data: &[(&str, &str)]) {
    let data = format_data(data);
    info!(target: TARGET, event = name, data = %data, "Event: {}", name);
}

fn format_data(data: &[(&str, &str)]) -> String {
    let fields: Vec<String> = data
        .iter()
        .map(|(key, value)| format!("{key}={value:?}"))
        .collect();
    format!("{{{}}}", fields.join(", "))
}
