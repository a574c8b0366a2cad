//! Echo Bot Example
//!
//! A small demonstration of the Courier client: typed calls, photos by URL,
//! inline keyboards and both update loops.
//!
//! # Usage
//!
//! ```bash
//! COURIER_TELEGRAM__BOT_TOKEN=123:abc cargo run --package echo-bot
//! cargo run --package echo-bot -- --config bot.toml --webhook
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use courier::prelude::*;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Echoes messages back to their sender")]
struct Args {
    /// Configuration file (defaults to ./courier.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile
    #[arg(short, long)]
    profile: Option<String>,

    /// Serve a webhook instead of long polling
    #[arg(long)]
    webhook: bool,
}

const HELP_TEXT: &str = "Echo Bot - Commands
/echo <text> - Echo text
/ping - Pong!
/photo <url> - Send a photo by URL
/info - Message info
/help - This help";

// ============================================================================
// Handlers
// ============================================================================

async fn handle_update(bot: TelegramBot, update: Update) {
    if let Some(query) = update.callback_query() {
        handle_callback(&bot, query).await;
        return;
    }

    let Some(message) = update.message() else {
        return;
    };
    let Some(chat_id) = message.chat_id() else {
        return;
    };

    let sender = message
        .from()
        .map(User::full_name)
        .unwrap_or_else(|| "Unknown".to_string());
    info!(
        "[{}] {}: {}",
        chat_id,
        sender,
        message.text_or_caption().unwrap_or_default()
    );

    let result = match message.command() {
        Some(_) if !bot.is_command_for_me(message) => return,
        Some(cmd) => match cmd.name {
            "echo" if !cmd.args.is_empty() => bot
                .send_message(chat_id, cmd.args, ParameterBag::new())
                .await
                .map(drop),
            "ping" => {
                let keyboard = InlineKeyboardMarkup::default()
                    .row(vec![InlineKeyboardButton::callback("Again", "ping")]);
                bot.send_message(
                    chat_id,
                    "Pong!",
                    ParameterBag::new().with("reply_markup", keyboard),
                )
                .await
                .map(drop)
            }
            "photo" => match photo_url(cmd.args) {
                Some(url) => bot
                    .send_photo(chat_id, url, ParameterBag::new())
                    .await
                    .map(drop),
                None => bot
                    .send_message(chat_id, "Usage: /photo <https url>", ParameterBag::new())
                    .await
                    .map(drop),
            },
            "info" => bot
                .send_message(chat_id, &info_text(message), ParameterBag::new())
                .await
                .map(drop),
            _ => bot
                .send_message(chat_id, HELP_TEXT, ParameterBag::new())
                .await
                .map(drop),
        },
        None => match message.text.as_deref() {
            Some(text) => bot
                .send_message(
                    chat_id,
                    text,
                    ParameterBag::new().with_opt("reply_to_message_id", message.message_id),
                )
                .await
                .map(drop),
            None => Ok(()),
        },
    };

    if let Err(e) = result {
        error!("Failed to reply in chat {}: {}", chat_id, e);
    }
}

async fn handle_callback(bot: &TelegramBot, query: &CallbackQuery) {
    let Some(id) = query.id.as_deref() else {
        return;
    };
    let text = match query.data.as_deref() {
        Some("ping") => "Pong!",
        _ => "Unknown button",
    };
    if let Err(e) = bot
        .answer_callback_query(id, ParameterBag::new().with("text", text))
        .await
    {
        error!("Failed to answer callback query: {}", e);
    }
}

/// Accepts only web URLs from chat input: any other string under `photo`
/// could name a file on this host and be uploaded.
fn photo_url(arg: &str) -> Option<&str> {
    let arg = arg.trim();
    (arg.starts_with("https://") || arg.starts_with("http://")).then_some(arg)
}

fn info_text(message: &Message) -> String {
    let chat = message.chat();
    let kind = chat.and_then(|c| c.kind.as_deref()).unwrap_or("unknown");
    let title = chat
        .and_then(|c| c.title.clone())
        .unwrap_or_else(|| "-".to_string());
    let replying_to = message
        .reply_to_message()
        .and_then(|m| m.message_id)
        .map_or_else(|| "-".to_string(), |id| id.to_string());

    format!(
        "Message Info\n\
        • Chat: {} ({})\n\
        • Message ID: {}\n\
        • Reply to: {}",
        title,
        kind,
        message.message_id.unwrap_or_default(),
        replying_to
    )
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = CourierRuntime::builder();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &args.profile {
        builder = builder.profile(profile);
    }
    let runtime = builder.build()?;

    let me = runtime.bot().get_me().await?;
    info!(
        "Logged in as @{}",
        me.username.as_deref().unwrap_or("unknown")
    );
    let bot = match me.username {
        Some(username) => runtime.bot().clone().with_username(username),
        None => runtime.bot().clone(),
    };

    if args.webhook {
        runtime
            .run_webhook(move |_, update| handle_update(bot.clone(), update))
            .await?;
    } else {
        runtime
            .run_polling(|_, update| handle_update(bot.clone(), update))
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_url_rejects_local_paths() {
        assert_eq!(
            photo_url(" https://example.com/cat.jpg "),
            Some("https://example.com/cat.jpg")
        );
        assert_eq!(photo_url("/etc/passwd"), None);
        assert_eq!(photo_url("../secrets.png"), None);
        assert_eq!(photo_url("file:///etc/passwd"), None);
        assert_eq!(photo_url(""), None);
    }
}
