// notifier/telegram/sender.rs

use crate::model::NotifyError;
use crate::notifier::telegram::TelegramNotifier;
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{info, warn};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Removes HTML tags and undoes the escaping applied for `parse_mode: HTML`.
pub fn strip_markup(text: &str) -> String {
    TAG_RE
        .replace_all(text, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// `ok: false` answer from the Bot API.
#[derive(Debug)]
struct Refusal {
    status: StatusCode,
    description: String,
}

/// Sends `text` as HTML. If Telegram refuses it with 400 (typically markup it
/// cannot parse), retries once as plain text with the markup stripped.
pub async fn send_html(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let Some(refusal) = post(notifier, text, Some("HTML")).await? else {
        return Ok(());
    };
    if refusal.status != StatusCode::BAD_REQUEST {
        warn!(
            "❌ Telegram refused message [{}]: {}",
            refusal.status, refusal.description
        );
        return Err(NotifyError::Rejected(refusal.description));
    }

    warn!(
        "⚠️ Telegram refused HTML message ({}), retrying as plain text",
        refusal.description
    );
    let plain = strip_markup(text);
    match post(notifier, &plain, None).await? {
        None => Ok(()),
        Some(refusal) => {
            warn!("❌ Telegram refused plain text message: {}", refusal.description);
            Err(NotifyError::Rejected(refusal.description))
        }
    }
}

/// Posts one `sendMessage`. `Ok(None)` means delivered.
async fn post(
    notifier: &TelegramNotifier,
    text: &str,
    parse_mode: Option<&str>,
) -> Result<Option<Refusal>, NotifyError> {
    let payload = SendMessage {
        chat_id: &notifier.chat_id,
        text,
        parse_mode,
    };
    let response = notifier
        .client
        .post(notifier.send_message_url())
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<ApiResponse>(&body) {
        Ok(api) if api.ok => {
            info!("✅ Telegram message sent [{}]", status);
            Ok(None)
        }
        Ok(api) => Ok(Some(Refusal {
            status,
            description: api.description.unwrap_or_else(|| format!("status {}", status)),
        })),
        Err(_) => {
            warn!("❌ Telegram API responded [{}]: {}", status, body);
            Err(NotifyError::Rejected(format!("status {}: {}", status, body)))
        }
    }
}
