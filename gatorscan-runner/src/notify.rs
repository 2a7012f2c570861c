//! Alert delivery.
//!
//! A fired signal becomes an [`Alert`]; a [`Notifier`] delivers it. Telegram
//! is the real channel, `LogNotifier` stands in when no credentials are set.

use std::time::Duration;

use gatorscan_core::components::signal::SignalDecision;
use gatorscan_core::domain::Timeframe;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::TelegramConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(String),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub instrument: String,
    pub timeframe: Timeframe,
    /// Situation text, e.g. "bullish breakout".
    pub description: String,
}

impl Alert {
    /// `None` unless the decision is active.
    pub fn from_decision(instrument: &str, timeframe: Timeframe, decision: &SignalDecision) -> Option<Self> {
        let (active, description) = decision.as_pair();
        active.then(|| Self {
            instrument: instrument.to_string(),
            timeframe,
            description: description.to_string(),
        })
    }

    pub fn message(&self) -> String {
        format!(
            "{} in {} timeframe, in {} currency",
            self.description, self.timeframe, self.instrument
        )
    }
}

pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}

/// Writes alerts to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        info!(
            instrument = %alert.instrument,
            timeframe = %alert.timeframe,
            "{}",
            alert.message()
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API `sendMessage`.
pub struct TelegramNotifier {
    client: reqwest::blocking::Client,
    base_url: String,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| NotifyError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: "https://api.telegram.org".to_string(),
            config,
        })
    }

    /// Point at a different API host (a local Bot API server, or a test double).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let text = alert.message();
        let body = SendMessage {
            chat_id: &self.config.chat_id,
            text: &text,
        };
        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| NotifyError::Http(e.without_url().to_string()))?;

        let status = resp.status();
        let parsed: Option<TelegramResponse> = resp.json().ok();
        match parsed {
            Some(TelegramResponse { ok: true, .. }) if status.is_success() => {
                info!(instrument = %alert.instrument, timeframe = %alert.timeframe, "alert sent");
                Ok(())
            }
            Some(TelegramResponse { description, .. }) => Err(NotifyError::Rejected(
                description.unwrap_or_else(|| format!("HTTP {status}")),
            )),
            None => Err(NotifyError::Rejected(format!("HTTP {status}"))),
        }
    }
}
