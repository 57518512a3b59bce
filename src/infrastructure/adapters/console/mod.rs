//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton, Notifier};

/// Console bot adapter for local development
///
/// Prints responses and button rows to stdout; operator notifications are
/// printed with the recipient id so checkout flows can be exercised
/// without a Telegram token.
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: bot_name.into(),
                username: "console".to_string(),
            },
        }
    }

    pub fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok()?;
        Some(input.trim().to_string())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: i64, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        _chat_id: i64,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        for row in buttons {
            let labels: Vec<String> = row
                .iter()
                .map(|b| {
                    format!(
                        "{} <{}>",
                        b.text,
                        b.callback_data.as_deref().unwrap_or("-")
                    )
                })
                .collect();
            println!("  [Buttons] {}", labels.join(" | "));
        }
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[async_trait]
impl Notifier for ConsoleAdapter {
    async fn notify(&self, recipient_id: i64, text: &str) -> Result<(), BotError> {
        println!("[NOTIFY -> {}] {}", recipient_id, text);
        Ok(())
    }
}
