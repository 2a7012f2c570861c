//! Scan configuration: which instruments and timeframes to sweep, how much
//! history to fetch, where to write output, and the engine parameters.
//!
//! Built once at process start from a TOML file, then overlaid with the
//! environment (`.env` is honoured), and passed around by reference.

use std::path::{Path, PathBuf};

use gatorscan_core::config::{ConfigError, EngineConfig};
use gatorscan_core::domain::{Timeframe, TimeframeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const ENV_INSTRUMENTS: &str = "CURRENCIES_LIST";
pub const ENV_TIMEFRAMES: &str = "TIME_FRAMES";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_TELEGRAM_CHAT: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error)]
pub enum ScanConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse scan config: {0}")]
    Parse(String),

    #[error("engine config: {0}")]
    Engine(#[from] ConfigError),

    #[error("timeframe: {0}")]
    Timeframe(#[from] TimeframeError),

    #[error("{var} is not a list: {value:?}")]
    BadList { var: &'static str, value: String },

    #[error("no instruments configured (set `instruments` or {ENV_INSTRUMENTS})")]
    NoInstruments,

    #[error("no timeframes configured (set `timeframes` or {ENV_TIMEFRAMES})")]
    NoTimeframes,

    #[error("history_length {history_length} leaves nothing after a warm-up of {warmup} bars")]
    HistoryTooShort { history_length: usize, warmup: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub instruments: Vec<String>,
    pub timeframes: Vec<Timeframe>,
    /// Bars fetched per pair (the most recent ones).
    pub history_length: usize,
    pub output_dir: PathBuf,
    pub engine: EngineConfig,
    pub telegram: Option<TelegramConfig>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            instruments: Vec::new(),
            timeframes: Vec::new(),
            history_length: 150,
            output_dir: PathBuf::from("charts"),
            engine: EngineConfig::default(),
            telegram: None,
        }
    }
}

impl ScanConfig {
    /// Parse from TOML without validating; the environment may still fill gaps.
    pub fn from_toml(content: &str) -> Result<Self, ScanConfigError> {
        toml::from_str(content).map_err(|e| ScanConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ScanConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScanConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// The full start-up sequence: optional file, `.env`, process
    /// environment, validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ScanConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env");
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment variables looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ScanConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_INSTRUMENTS) {
            self.instruments = parse_list(ENV_INSTRUMENTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEFRAMES) {
            self.timeframes = parse_list(ENV_TIMEFRAMES, &raw)?
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<Timeframe>, TimeframeError>>()?;
        }

        let token = lookup(ENV_TELEGRAM_TOKEN).filter(|s| !s.is_empty());
        let chat = lookup(ENV_TELEGRAM_CHAT).filter(|s| !s.is_empty());
        if let Some(tg) = self.telegram.as_mut() {
            if let Some(t) = token {
                tg.bot_token = t;
            }
            if let Some(c) = chat {
                tg.chat_id = c;
            }
        } else if let (Some(bot_token), Some(chat_id)) = (token, chat) {
            self.telegram = Some(TelegramConfig { bot_token, chat_id });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ScanConfigError> {
        if self.instruments.is_empty() {
            return Err(ScanConfigError::NoInstruments);
        }
        if self.timeframes.is_empty() {
            return Err(ScanConfigError::NoTimeframes);
        }
        self.engine.validate()?;
        let warmup = self.engine.effective_warmup();
        if self.history_length <= warmup {
            return Err(ScanConfigError::HistoryTooShort {
                history_length: self.history_length,
                warmup,
            });
        }
        Ok(())
    }
}

/// Accepts `["EURUSD", "GBPUSD"]` (JSON) or `EURUSD, GBPUSD`.
pub fn parse_list(var: &'static str, raw: &str) -> Result<Vec<String>, ScanConfigError> {
    let raw = raw.trim();
    let items: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|_| ScanConfigError::BadList {
            var,
            value: raw.to_string(),
        })?
    } else {
        raw.split(',')
            .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .collect()
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
