//! Synthesis request/response wire types and speaking styles.

use crate::audio::AudioFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone preset mapped to a speaking rate and pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakingStyle {
    #[default]
    Neutral,
    Calm,
    Serious,
    Excited,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    pub speaking_rate: f64,
    pub pitch: f64,
}

impl SpeakingStyle {
    pub const ALL: [SpeakingStyle; 4] = [Self::Neutral, Self::Calm, Self::Serious, Self::Excited];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Calm => "calm",
            Self::Serious => "serious",
            Self::Excited => "excited",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Calm => "Calm",
            Self::Serious => "Serious",
            Self::Excited => "Excited",
        }
    }

    pub fn params(&self) -> StyleParams {
        let (speaking_rate, pitch) = match self {
            Self::Neutral => (1.0, 0.0),
            Self::Calm => (0.85, -2.0),
            Self::Serious => (0.9, -1.0),
            Self::Excited => (1.15, 2.0),
        };
        StyleParams {
            speaking_rate,
            pitch,
        }
    }

    /// Parses a stored style name, falling back to neutral.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for SpeakingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeakingStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s.trim())
            .ok_or_else(|| crate::Error::validation(format!("unknown speaking style '{}'", s)))
    }
}

/// How the front end renders the player. Stored only; the core never renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStyle {
    #[default]
    Audio,
    Icon,
}

impl PlayerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Icon => "icon",
        }
    }
}

impl FromStr for PlayerStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim() {
            "audio" => Ok(Self::Audio),
            "icon" => Ok(Self::Icon),
            other => Err(crate::Error::validation(format!("unknown player style '{}'", other))),
        }
    }
}

/// Encoding requested from the synthesis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioEncoding {
    #[default]
    #[serde(rename = "MP3")]
    Mp3,
}

impl AudioEncoding {
    pub fn expected_format(&self) -> AudioFormat {
        match self {
            Self::Mp3 => AudioFormat::Mp3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelection,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisInput {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f64,
    pub pitch: f64,
}

/// Successful answer: base64 audio.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SynthesisResponse {
    #[serde(rename = "audioContent")]
    pub audio_content: Option<String>,
}

/// Failure answer: `{"error": {"message": ...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteErrorBody {
    pub error: Option<RemoteErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemoteErrorDetail {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_table() {
        assert_eq!(SpeakingStyle::Excited.params(), StyleParams { speaking_rate: 1.15, pitch: 2.0 });
        assert_eq!(SpeakingStyle::Calm.params(), StyleParams { speaking_rate: 0.85, pitch: -2.0 });
        assert_eq!(SpeakingStyle::Serious.params(), StyleParams { speaking_rate: 0.9, pitch: -1.0 });
        assert_eq!(SpeakingStyle::Neutral.params(), StyleParams { speaking_rate: 1.0, pitch: 0.0 });
    }

    #[test]
    fn test_unknown_style_falls_back_to_neutral() {
        assert_eq!(SpeakingStyle::from_name_or_default("shouty"), SpeakingStyle::Neutral);
        assert_eq!(SpeakingStyle::from_name_or_default("calm"), SpeakingStyle::Calm);
        assert!("Calm".parse::<SpeakingStyle>().is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let req = SynthesisRequest {
            input: SynthesisInput { text: "Hi".into() },
            voice: VoiceSelection {
                language_code: "en-GB".into(),
                name: "en-GB-Wavenet-B".into(),
            },
            audio_config: AudioConfig {
                audio_encoding: AudioEncoding::Mp3,
                speaking_rate: 0.9,
                pitch: -1.0,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "input": {"text": "Hi"},
                "voice": {"languageCode": "en-GB", "name": "en-GB-Wavenet-B"},
                "audioConfig": {"audioEncoding": "MP3", "speakingRate": 0.9, "pitch": -1.0}
            })
        );
    }

    #[test]
    fn test_error_body_without_message() {
        let body: RemoteErrorBody = serde_json::from_str(r#"{"error":{"code":403}}"#).unwrap();
        assert!(body.error.unwrap().message.is_none());
    }
}
