//! Connector configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CaseSensitivity;
use crate::error::{DeepboxError, Result};
use crate::fs::Locale;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.deepbox.swiss";

/// Which encoding is used for Inbox/Documents/Trash identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// Fixed constants shared by all boxes.
    #[default]
    WellKnown,
    /// `{boxId}_{name}`.
    Synthetic,
}

/// Settings read once when a session is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepboxConfig {
    /// Page size for every paginated listing call.
    pub listing_chunk_size: u32,
    pub case_sensitivity: CaseSensitivity,
    /// Language of the third-level container names shown in listings.
    pub locale: Locale,
    pub identifier_scheme: SchemeKind,
    pub base_url: String,
    /// Environment prefix of the web host used for preview links, e.g. `"dev."`.
    pub stage: String,
    pub request_timeout_secs: u64,
}

impl Default for DeepboxConfig {
    fn default() -> Self {
        Self {
            listing_chunk_size: 100,
            case_sensitivity: CaseSensitivity::Sensitive,
            locale: Locale::EnUk,
            identifier_scheme: SchemeKind::WellKnown,
            base_url: DEFAULT_BASE_URL.to_string(),
            stage: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl DeepboxConfig {
    /// Defaults overlaid with `DEEPBOX_*` environment variables.
    ///
    /// Recognized: `DEEPBOX_LISTING_CHUNKSIZE`, `DEEPBOX_LOCALE`,
    /// `DEEPBOX_CASE_INSENSITIVE`, `DEEPBOX_ID_SCHEME`, `DEEPBOX_BASE_URL`,
    /// `DEEPBOX_STAGE`, `DEEPBOX_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("DEEPBOX_LISTING_CHUNKSIZE") {
            config.listing_chunk_size = value.trim().parse().map_err(|_| {
                DeepboxError::InvalidConfig(format!("DEEPBOX_LISTING_CHUNKSIZE={}", value))
            })?;
        }
        if let Some(value) = lookup("DEEPBOX_LOCALE") {
            config.locale = Locale::from_tag(value.trim())
                .ok_or_else(|| DeepboxError::InvalidConfig(format!("DEEPBOX_LOCALE={}", value)))?;
        }
        if let Some(value) = lookup("DEEPBOX_CASE_INSENSITIVE") {
            if matches!(value.trim(), "1" | "true" | "yes") {
                config.case_sensitivity = CaseSensitivity::Insensitive;
            }
        }
        if let Some(value) = lookup("DEEPBOX_ID_SCHEME") {
            config.identifier_scheme = match value.trim() {
                "well_known" => SchemeKind::WellKnown,
                "synthetic" => SchemeKind::Synthetic,
                other => {
                    return Err(DeepboxError::InvalidConfig(format!(
                        "DEEPBOX_ID_SCHEME={}",
                        other
                    )));
                }
            };
        }
        if let Some(value) = lookup("DEEPBOX_BASE_URL") {
            config.base_url = value;
        }
        if let Some(value) = lookup("DEEPBOX_STAGE") {
            config.stage = value;
        }
        if let Some(value) = lookup("DEEPBOX_TIMEOUT_SECS") {
            config.request_timeout_secs = value.trim().parse().map_err(|_| {
                DeepboxError::InvalidConfig(format!("DEEPBOX_TIMEOUT_SECS={}", value))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_listing_chunk_size(mut self, chunk_size: u32) -> Self {
        self.listing_chunk_size = chunk_size;
        self
    }

    pub fn with_case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_identifier_scheme(mut self, scheme: SchemeKind) -> Self {
        self.identifier_scheme = scheme;
        self
    }

    /// Reject settings no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.listing_chunk_size == 0 {
            return Err(DeepboxError::InvalidConfig(
                "listing_chunk_size must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(DeepboxError::InvalidConfig(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Web preview link of a node.
    pub fn preview_url(&self, node_id: &str) -> String {
        format!("https://{}deepbox.swiss/node/{}/preview", self.stage, node_id)
    }
}
