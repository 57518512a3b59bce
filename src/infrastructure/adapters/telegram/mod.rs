//! Telegram adapter

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::Shopper;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton, Notifier};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Characters MarkdownV2 requires escaping
static MARKDOWN_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([_*\[\]()~`>#+\-=|{}.!\\])").expect("valid escape pattern"));

/// Escape all MarkdownV2 special characters
pub fn escape_markdown_v2(text: &str) -> String {
    MARKDOWN_ESCAPE.replace_all(text, r"\$1").into_owned()
}

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    /// The acting shopper behind this Telegram user
    pub fn to_shopper(&self) -> Shopper {
        let mut shopper = Shopper::new(self.id);
        if let Some(ref username) = self.username {
            shopper = shopper.with_username(username.clone());
        }
        if let Some(ref first_name) = self.first_name {
            shopper = shopper.with_first_name(first_name.clone());
        }
        shopper
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

#[derive(Serialize)]
struct ReplyMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: bot_name.into(),
                username: "unknown".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: BotInfoResponse,
        }

        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: data.result.id.to_string(),
            name: data.result.first_name,
            username: data.result.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using the getUpdates long poll
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string(), "callback_query".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update]) -> i64 {
        updates.iter().map(|u| u.update_id + 1).max().unwrap_or(0)
    }

    /// Register the command menu with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: String,
            description: String,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let commands = vec![
            Command {
                command: "start".to_string(),
                description: "Ver el catálogo".to_string(),
            },
            Command {
                command: "cart".to_string(),
                description: "Ver tu carrito".to_string(),
            },
            Command {
                command: "checkout".to_string(),
                description: "Finalizar pedido".to_string(),
            },
            Command {
                command: "clear".to_string(),
                description: "Vaciar el carrito".to_string(),
            },
            Command {
                command: "currency".to_string(),
                description: "Cambiar moneda (CUP/USDT)".to_string(),
            },
        ];

        let url = self.api_url("setMyCommands");
        let request = SetMyCommandsRequest { commands };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!(
                "Failed to register commands: {}",
                error
            )));
        }

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    /// Send a message: try MarkdownV2 with escaping, fall back to plain
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<(), BotError> {
        let escaped = escape_markdown_v2(text);
        match self
            .send_raw(chat_id, &escaped, Some("MarkdownV2"), reply_markup.as_ref())
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("Markdown send failed, using plain text: {}", e);
                self.send_raw(chat_id, text, None, reply_markup.as_ref()).await
            }
        }
    }

    async fn send_raw(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: i64,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<&'a ReplyMarkup>,
        }

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            reply_markup,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        tracing::debug!("Sending {} chars to {}", text.len(), chat_id);
        self.send_text(chat_id, text, None).await
    }

    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<(), BotError> {
        let inline_keyboard = buttons
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|btn| InlineKeyboardButton {
                        text: btn.text,
                        callback_data: btn.callback_data,
                    })
                    .collect()
            })
            .collect();

        self.send_text(chat_id, text, Some(ReplyMarkup { inline_keyboard }))
            .await
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }

        let url = self.api_url("answerCallbackQuery");
        let request = AnswerRequest {
            callback_query_id: callback_id,
            text,
        };

        self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[async_trait]
impl Notifier for TelegramAdapter {
    async fn notify(&self, recipient_id: i64, text: &str) -> Result<(), BotError> {
        self.send_text(recipient_id, text, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_markdown_special_character() {
        assert_eq!(
            escape_markdown_v2("a_b*c[d]e(f)g.h!i-j"),
            r"a\_b\*c\[d\]e\(f\)g\.h\!i\-j"
        );
    }

    #[test]
    fn plain_text_passes_through_untouched() {
        assert_eq!(escape_markdown_v2("hola mundo 123"), "hola mundo 123");
    }

    #[test]
    fn next_offset_is_one_past_the_highest_update() {
        let updates = vec![
            Update {
                update_id: 10,
                message: None,
                callback_query: None,
            },
            Update {
                update_id: 12,
                message: None,
                callback_query: None,
            },
        ];
        assert_eq!(TelegramAdapter::get_next_offset(&updates), 13);
        assert_eq!(TelegramAdapter::get_next_offset(&[]), 0);
    }

    #[test]
    fn telegram_user_maps_to_shopper() {
        let user = User {
            id: 42,
            username: Some("ana".to_string()),
            first_name: Some("Ana".to_string()),
        };
        let shopper = user.to_shopper();
        assert_eq!(shopper.id, 42);
        assert_eq!(shopper.display_name(), "ana");
    }
}
