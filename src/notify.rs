//! Best-effort notifications to a messaging bot
//!
//! Nothing in the application ever depends on a notification going through: failures are
//! logged and swallowed, and an unconfigured notifier silently sends nothing.

use crate::settings::{BOT_CHAT_ID, BOT_TOKEN};

/// Posts messages to a messaging-bot webhook
pub struct Notifier {
    bot_token: String,
    chat_id: String,
}

impl Notifier {
    pub fn new<T: ToString, U: ToString>(bot_token: T, chat_id: U) -> Self {
        Self {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// A notifier configured from the deployment constants
    pub fn from_settings() -> Self {
        Self::new(BOT_TOKEN, BOT_CHAT_ID)
    }

    fn is_configured(&self) -> bool {
        self.bot_token.is_empty() == false && self.chat_id.is_empty() == false
    }

    /// Fire one message at the webhook. Failures are logged, never returned.
    pub async fn send_message(&self, text: &str) {
        if self.is_configured() == false {
            return;
        }

        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let result = reqwest::Client::new()
            .post(&url)
            .json(&body)
            .send()
            .await;

        match result {
            Err(err) => log::warn!("Unable to send a notification: {}", err),
            Ok(response) => {
                if response.status().is_success() == false {
                    log::warn!("Notification endpoint returned HTTP status {:?}", response.status());
                }
            },
        }
    }
}
