//! Typed settings on top of an [`OptionStore`].
//!
//! Reading never fails on a bad stored value: each field falls back to its
//! default. Writing goes through [`SettingsUpdate`], which drops values that
//! would not survive a later read.

use crate::store::{keys, OptionStore};
use crate::tts::{PlayerStyle, SpeakingStyle};
use crate::usage::{UsageLedger, DEFAULT_USAGE_LIMIT};
use crate::Result;
use serde::Serialize;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const DEFAULT_CHARSET: &str = "UTF-8";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub language_code: String,
    /// Preferred voice; empty means the language default.
    pub voice_name: String,
    pub usage_limit: u64,
    pub speaking_style: SpeakingStyle,
    pub player_style: PlayerStyle,
    /// Site character encoding label, e.g. `UTF-8`.
    pub charset: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            voice_name: String::new(),
            usage_limit: DEFAULT_USAGE_LIMIT,
            speaking_style: SpeakingStyle::default(),
            player_style: PlayerStyle::default(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl Settings {
    pub async fn load(store: &dyn OptionStore) -> Result<Self> {
        let defaults = Self::default();
        let text = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let usage_limit = match text(store.get(keys::USAGE_LIMIT).await?) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid stored usage limit");
                    defaults.usage_limit
                }
            },
            None => defaults.usage_limit,
        };

        Ok(Self {
            api_key: text(store.get(keys::API_KEY).await?),
            language_code: text(store.get(keys::LANGUAGE_CODE).await?)
                .unwrap_or(defaults.language_code),
            voice_name: text(store.get(keys::VOICE_NAME).await?).unwrap_or_default(),
            usage_limit,
            speaking_style: text(store.get(keys::SPEAKING_STYLE).await?)
                .map(|s| SpeakingStyle::from_name_or_default(&s))
                .unwrap_or_default(),
            player_style: text(store.get(keys::PLAYER_STYLE).await?)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            charset: text(store.get(keys::BLOG_CHARSET).await?).unwrap_or(defaults.charset),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// A settings form submission. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub language_code: Option<String>,
    pub voice_name: Option<String>,
    pub usage_limit: Option<i64>,
    pub speaking_style: Option<String>,
    pub player_style: Option<String>,
}

impl SettingsUpdate {
    /// Writes the acceptable fields and returns the option keys written.
    ///
    /// Text is trimmed. A usage limit is written only when positive, and a
    /// style only when it names a known style.
    pub async fn apply(&self, store: &dyn OptionStore) -> Result<Vec<&'static str>> {
        let mut written = Vec::new();

        for (key, value) in [
            (keys::API_KEY, &self.api_key),
            (keys::LANGUAGE_CODE, &self.language_code),
            (keys::VOICE_NAME, &self.voice_name),
        ] {
            if let Some(value) = value {
                store.set(key, value.trim()).await?;
                written.push(key);
            }
        }

        if let Some(limit) = self.usage_limit {
            if limit > 0 {
                store.set(keys::USAGE_LIMIT, &limit.to_string()).await?;
                written.push(keys::USAGE_LIMIT);
            } else {
                tracing::debug!(limit, "usage limit not saved");
            }
        }

        if let Some(style) = self.speaking_style.as_deref() {
            if let Ok(style) = style.parse::<SpeakingStyle>() {
                store.set(keys::SPEAKING_STYLE, style.as_str()).await?;
                written.push(keys::SPEAKING_STYLE);
            }
        }

        if let Some(style) = self.player_style.as_deref() {
            if let Ok(style) = style.parse::<PlayerStyle>() {
                store.set(keys::PLAYER_STYLE, style.as_str()).await?;
                written.push(keys::PLAYER_STYLE);
            }
        }

        Ok(written)
    }
}

/// Reads the usage ledger; absent or blank means empty.
///
/// # Errors
///
/// A stored ledger that is not valid JSON is reported rather than reset.
pub async fn load_ledger(store: &dyn OptionStore) -> Result<UsageLedger> {
    match store.get(keys::USAGE_DATA).await? {
        Some(raw) if !raw.trim().is_empty() => UsageLedger::from_json(&raw),
        _ => Ok(UsageLedger::new()),
    }
}

pub async fn save_ledger(store: &dyn OptionStore, ledger: &UsageLedger) -> Result<()> {
    store.set(keys::USAGE_DATA, &ledger.to_json()?).await
}
