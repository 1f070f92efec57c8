use std::io::{self, BufRead, Write};
use std::sync::Arc;

use time::format_description::FormatItem;
use time::macros::format_description;

use coursemate::api::HttpAssistantApi;
use coursemate::chat::{ChatWidget, LoadOutcome, LogNotifier, SendOutcome};
use coursemate::types::Role;

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

fn load_dotenv() {
    // Optional .env for local development; deployments set the
    // environment directly.
    let _ = dotenvy::dotenv();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt::init();

    let api = Arc::new(HttpAssistantApi::from_env()?);
    let mut widget = ChatWidget::new(api, Arc::new(LogNotifier));
    widget.set_identity(std::env::var("COURSEMATE_USER_ID").ok());
    widget.open().await;

    println!("Coursemate assistant ({:?} session).", widget.mode());
    println!("Type a message, or /more, /clear, /quit.");
    render(&widget);

    let mut lines = io::stdin().lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "" => continue,
            "/quit" => break,
            "/more" => {
                if widget.load_more().await == LoadOutcome::Skipped {
                    println!("(no further history)");
                }
                render(&widget);
            }
            "/clear" => {
                widget.clear_history().await;
                render(&widget);
            }
            text => {
                if widget.send(text).await == SendOutcome::Failed {
                    println!("(message not sent)");
                }
                render(&widget);
            }
        }
    }

    Ok(())
}

fn render(widget: &ChatWidget) {
    for message in widget.display_messages() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        let stamp = message
            .timestamp
            .format(MESSAGE_TIME_FORMAT)
            .unwrap_or_default();
        println!("[{stamp}] {who}: {}", message.body);
    }
    if let Some(language) = widget.detected_language() {
        println!("(detected language: {language})");
    }
}
