use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use tracing::warn;

use crate::clients::{ModelEndpoint, gemini_client, xai_client};
use crate::models::event;
use crate::service::translator::TranslatorBackend;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";

/// `KEY=value` pairs from an env-style file.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    /// Loads `CONFIG_FILE` when set; a broken file is logged and ignored.
    pub fn from_env() -> Self {
        match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|err| {
                warn!(path = %path, error = %err, "ignoring unreadable config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment. Empty values count as unset.
    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key)
            .or_else(|| env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }
}

/// Everything the planner needs at startup, resolved from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub events_file: PathBuf,
    pub backend: TranslatorBackend,
    pub xai: ModelEndpoint,
    pub gemini: ModelEndpoint,
    pub http_timeout: Option<Duration>,
    pub bind_addr: SocketAddr,
    pub timezone: Tz,
}

impl Settings {
    pub fn resolve(config: &AppConfig) -> Result<Self, String> {
        let events_file = match config.prop("EVENTS_FILE") {
            Some(path) => PathBuf::from(path),
            None => match config.prop("DB_LOCATION") {
                Some(dir) => PathBuf::from(dir).join("events.json"),
                None => event::get_events_file(),
            },
        };

        let backend = match config.prop("TRANSLATOR_BACKEND") {
            Some(name) => name.parse::<TranslatorBackend>()?,
            None => TranslatorBackend::Gemini,
        };

        let xai = ModelEndpoint {
            base_url: config
                .prop("XAI_BASE_URL")
                .unwrap_or_else(|| xai_client::DEFAULT_BASE_URL.to_string()),
            model: config
                .prop("XAI_MODEL")
                .unwrap_or_else(|| xai_client::DEFAULT_MODEL.to_string()),
            api_key: config.prop("XAI_API_KEY"),
        };

        let gemini = ModelEndpoint {
            base_url: config
                .prop("GEMINI_BASE_URL")
                .unwrap_or_else(|| gemini_client::DEFAULT_BASE_URL.to_string()),
            model: config
                .prop("GEMINI_MODEL")
                .unwrap_or_else(|| gemini_client::DEFAULT_MODEL.to_string()),
            api_key: config.prop("GEMINI_API_KEY"),
        };

        let http_timeout = match config.prop("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| format!("HTTP_TIMEOUT_SECS must be a whole number, got {}", raw))?,
            )),
            None => None,
        };

        let bind_raw = config
            .prop("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid BIND_ADDR {}: {}", bind_raw, e))?;

        let timezone = match config.prop("PLANNER_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| format!("Invalid PLANNER_TIMEZONE {}: {}", name, e))?,
            None => Tz::UTC,
        };

        Ok(Self {
            events_file,
            backend,
            xai,
            gemini,
            http_timeout,
            bind_addr,
            timezone,
        })
    }

    pub fn active_endpoint(&self) -> &ModelEndpoint {
        match self.backend {
            TranslatorBackend::Gemini => &self.gemini,
            TranslatorBackend::Xai => &self.xai,
        }
    }
}
