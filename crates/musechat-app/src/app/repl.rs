use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use uuid::Uuid;

use musechat_chat::{ChatError, ChatManager, SendOutcome};
use musechat_models::{find_model, FREE_MODELS};

/// Run the interactive chat loop
pub async fn run_repl(mut manager: ChatManager) -> Result<()> {
    println!(
        "{}",
        "💬 MuseChat - OpenRouter chat with local history"
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        format!(
            "{} conversation(s) on disk • model: {}",
            manager.state().conversations.len(),
            manager.state().selected_model
        )
        .bright_black()
    );
    println!(
        "{}",
        "Type a message to chat, /help for commands, 'exit' to quit\n".bright_black()
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let model_indicator = format!("[{}]", model_label(&manager)).bright_magenta();
        let readline = rl.readline(&format!(
            "{} {} ",
            model_indicator,
            "You:".bright_green().bold()
        ));

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    break;
                }

                if let Some(command) = line.strip_prefix('/') {
                    handle_command(&mut manager, command);
                    continue;
                }

                send(&mut manager, line).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    println!("{}", "👋 Bye!".bright_cyan());
    Ok(())
}

/// Print the free-model registry
pub fn print_models() {
    println!("{}", "Available free-tier models:".bright_cyan().bold());
    for (i, model) in FREE_MODELS.iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            i + 1,
            model.name.bright_green(),
            model.id.bright_black()
        );
    }
}

fn model_label(manager: &ChatManager) -> String {
    let selected = &manager.state().selected_model;
    find_model(selected)
        .map(|m| m.name.to_string())
        .unwrap_or_else(|| selected.clone())
}

async fn send(manager: &mut ChatManager, text: &str) {
    print!("{}", "🤔 Thinking...".bright_black());
    let _ = io::stdout().flush();

    let outcome = manager.send_message(text).await;

    // Clear the thinking indicator
    print!("\r\x1B[K");
    let _ = io::stdout().flush();

    match outcome {
        Ok(SendOutcome::Replied) => {
            if let Some(reply) = manager.current_conversation().and_then(|c| c.messages.last()) {
                println!("{} {}", "Assistant:".bright_blue().bold(), reply.content);
            }
            println!(
                "{}",
                format!("📊 Session tokens: {}", manager.total_tokens_used()).bright_black()
            );
        }
        Ok(SendOutcome::Failed) => {
            if let Some(error) = &manager.state().error {
                eprintln!("{} {}", "❌".red(), error);
                eprintln!("{}", "Use /clear-error to dismiss".bright_black());
            }
        }
        Ok(SendOutcome::Ignored) => {}
        Err(ChatError::RequestInFlight) => {
            eprintln!(
                "{} A completion request is already in flight",
                "⏳".yellow()
            );
        }
        Err(e) => eprintln!("{} {}", "❌".red(), e),
    }
}

fn handle_command(manager: &mut ChatManager, input: &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match command {
        "help" => print_help(),
        "new" => {
            manager.create_conversation();
            println!("{}", "Started a new chat".green());
        }
        "list" => list_conversations(manager),
        "select" => match parse_index(manager, rest) {
            Some(id) => {
                if let Err(e) = manager.select_conversation(id) {
                    eprintln!("{} {}", "❌".red(), e);
                } else if let Some(conversation) = manager.current_conversation() {
                    println!("Switched to {}", conversation.title.bright_green());
                    for message in &conversation.messages {
                        print_message_line(message);
                    }
                }
            }
            None => eprintln!("{} Usage: /select <number> (see /list)", "❌".red()),
        },
        "delete" => {
            let id = if rest.is_empty() {
                manager.state().current_conversation_id
            } else {
                parse_index(manager, rest)
            };
            match id {
                Some(id) => match manager.delete_conversation(id) {
                    Ok(()) => println!("{}", "Conversation deleted".green()),
                    Err(e) => eprintln!("{} {}", "❌".red(), e),
                },
                None => eprintln!("{} Nothing to delete", "❌".red()),
            }
        }
        "rename" => {
            let current = manager.state().current_conversation_id;
            match current {
                Some(id) => match manager.rename_conversation(id, rest) {
                    Ok(()) => println!("{}", "Conversation renamed".green()),
                    Err(e) => eprintln!("{} {}", "❌".red(), e),
                },
                None => eprintln!("{} No current conversation", "❌".red()),
            }
        }
        "model" => {
            if rest.is_empty() {
                println!(
                    "Current model: {}",
                    manager.state().selected_model.bright_green()
                );
                return;
            }
            // Accept either a registry position or a model id
            let model = rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| FREE_MODELS.get(i))
                .map(|m| m.id.to_string())
                .unwrap_or_else(|| rest.to_string());
            if find_model(&model).is_none() {
                eprintln!(
                    "{} {} is not in the free-model registry; using it anyway",
                    "⚠️".yellow(),
                    model
                );
            }
            manager.set_selected_model(model);
            println!(
                "Switched model to {}",
                manager.state().selected_model.bright_green()
            );
        }
        "models" => print_models(),
        "export" => {
            let id = if rest.is_empty() {
                manager.state().current_conversation_id
            } else {
                parse_index(manager, rest)
            };
            match id {
                Some(id) => match manager.export_conversation(id) {
                    Ok(Some(path)) => {
                        println!("{} Exported to {}", "✓".green(), path.display())
                    }
                    Ok(None) => eprintln!("{} Conversation not found", "❌".red()),
                    Err(e) => eprintln!("{} {}", "❌".red(), e),
                },
                None => eprintln!("{} Nothing to export", "❌".red()),
            }
        }
        "clear-error" => {
            manager.clear_error();
            println!("{}", "Error dismissed".green());
        }
        _ => eprintln!(
            "{} Unknown command /{}; try /help",
            "❌".red(),
            command
        ),
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan().bold());
    println!("  /new               start a new chat");
    println!("  /list              list conversations (newest first)");
    println!("  /select <n>        switch to conversation n");
    println!("  /delete [n]        delete conversation n (default: current)");
    println!("  /rename <title>    rename the current conversation");
    println!("  /model [id|n]      show or switch the selected model");
    println!("  /models            list the free-tier models");
    println!("  /export [n]        export conversation n to a JSON file");
    println!("  /clear-error       dismiss the last error");
    println!("  exit, quit         leave");
}

fn list_conversations(manager: &ChatManager) {
    let state = manager.state();
    if state.conversations.is_empty() {
        println!("{}", "No conversations yet; just start typing".bright_black());
        return;
    }
    for (i, conversation) in state.conversations.iter().enumerate() {
        let marker = if state.current_conversation_id == Some(conversation.id) {
            "▸".bright_green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:>2}. {} {}",
            marker,
            i + 1,
            conversation.title,
            format!(
                "({} messages, updated {})",
                conversation.messages.len(),
                conversation.updated_at.format("%Y-%m-%d %H:%M")
            )
            .bright_black()
        );
    }
}

fn print_message_line(message: &musechat_models::Message) {
    match message.role {
        musechat_models::Role::User => {
            println!("{} {}", "You:".bright_green().bold(), message.content)
        }
        musechat_models::Role::Assistant => {
            println!("{} {}", "Assistant:".bright_blue().bold(), message.content)
        }
    }
}

/// Resolve a 1-based list position into a conversation id
fn parse_index(manager: &ChatManager, input: &str) -> Option<Uuid> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| manager.state().conversations.get(i))
        .map(|c| c.id)
}
