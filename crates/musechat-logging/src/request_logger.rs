use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::fs;

use crate::{get_logs_dir, safe_truncate};

fn redacted_key(api_key: &str) -> String {
    format!("{}***", api_key.chars().take(10).collect::<String>())
}

/// Log HTTP request details for debugging (console output)
pub fn log_request<T: Serialize>(url: &str, request: &T, api_key: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());
    println!("{}: {}", "URL".bright_yellow(), url);

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    println!("  Authorization: Bearer {}", redacted_key(api_key));

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(request) {
        Ok(json) => {
            // Truncate very long requests for readability
            if json.chars().count() > 5000 {
                println!("{}", safe_truncate(&json, 5000));
                println!(
                    "\n{}",
                    format!("... (truncated, total {} bytes)", json.len()).bright_black()
                );
            } else {
                println!("{}", json);
            }
        }
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log HTTP response status and body for debugging (console output)
pub fn log_response(status: u16, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_green());
    println!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    println!("{}: {}", "Status".bright_yellow(), status);
    if body.chars().count() > 2000 {
        println!("{}: {}", "Body".bright_yellow(), safe_truncate(body, 2000));
    } else {
        println!("{}: {}", "Body".bright_yellow(), body);
    }
    println!("{}", "═".repeat(80).bright_green());
}

/// Log one SSE chunk in verbose mode
pub fn log_stream_chunk(index: usize, data: &str, verbose: bool) {
    if !verbose {
        return;
    }
    println!(
        "{} {}",
        format!("chunk {:>4}:", index).bright_black(),
        safe_truncate(data, 200).bright_black()
    );
}

/// Log HTTP request to file for persistent debugging
pub fn log_request_to_file<T: Serialize>(
    url: &str,
    request: &T,
    model: &str,
    api_key: &str,
) -> Result<()> {
    let logs_dir = get_logs_dir()?;

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
    let model_name = model.replace(['/', ':'], "-");
    let file_path = logs_dir.join(format!("req-{}-{}.txt", timestamp, model_name));

    let mut log_content = String::new();
    log_content.push_str("HTTP REQUEST LOG\n");
    log_content.push_str("================\n\n");
    log_content.push_str(&format!("Timestamp: {}\n", timestamp));
    log_content.push_str(&format!("Model: {}\n", model));
    log_content.push_str(&format!("URL: {}\n\n", url));

    log_content.push_str("Headers:\n");
    log_content.push_str("  Content-Type: application/json\n");
    log_content.push_str(&format!("  Authorization: Bearer {}\n\n", redacted_key(api_key)));

    log_content.push_str("Request Body:\n");
    match serde_json::to_string_pretty(request) {
        Ok(json) => {
            log_content.push_str(&json);
            log_content.push('\n');
        }
        Err(e) => {
            log_content.push_str(&format!("Error serializing request: {}\n", e));
        }
    }

    fs::write(&file_path, log_content)
        .with_context(|| format!("Failed to write request log to {}", file_path.display()))?;

    Ok(())
}
