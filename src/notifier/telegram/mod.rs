pub mod sender;

use crate::model::NotifyError;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: String,
    pub client: Client,
    pub api_base: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Result<Self, NotifyError> {
        if bot_token.trim().is_empty() {
            return Err(NotifyError::NotConfigured("telegram_bot_token"));
        }
        if chat_id.trim().is_empty() {
            return Err(NotifyError::NotConfigured("telegram_chat_id"));
        }
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            bot_token,
            chat_id,
            client,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Points the notifier at another Bot API host (a local server or a test double).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    /// Sends an HTML message; see [`sender::send_html`] for the plain-text fallback.
    pub async fn notify_text(&self, text: &str) -> Result<(), NotifyError> {
        sender::send_html(self, text).await
    }
}
