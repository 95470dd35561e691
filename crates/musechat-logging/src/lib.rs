// Logging module - request logging and shared directory helpers
pub mod request_logger;

use anyhow::{Context, Result};
use std::path::PathBuf;

// Re-export request logging functions
pub use request_logger::{log_request, log_request_to_file, log_response, log_stream_chunk};

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Get or create the base musechat directory (~/.musechat)
/// Shared between logging and conversation persistence
pub fn get_musechat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let musechat_dir = PathBuf::from(home_dir).join(".musechat");

    if !musechat_dir.exists() {
        std::fs::create_dir_all(&musechat_dir).context("Failed to create musechat directory")?;
    }

    Ok(musechat_dir)
}

/// Get or create the logs directory (~/.musechat/logs)
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = get_musechat_dir()?.join("logs");

    if !logs_dir.exists() {
        std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;
    }

    Ok(logs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_truncate_appends_ellipsis() {
        let long_text = "x".repeat(1000);
        let truncated = safe_truncate(&long_text, 100);

        assert_eq!(truncated.len(), 100);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn safe_truncate_keeps_short_strings() {
        let short_text = "Hello world";
        assert_eq!(safe_truncate(short_text, 100), short_text);
    }

    #[test]
    fn safe_truncate_counts_chars_not_bytes() {
        let text = "héllo".repeat(30);
        let truncated = safe_truncate(&text, 20);
        assert_eq!(truncated.chars().count(), 20);
    }
}
