//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `moodlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("moodlog_core ping={}", moodlog_core::ping());
    println!("moodlog_core version={}", moodlog_core::core_version());
}
