//! Assembles synthesis requests from stored settings.

use super::types::{
    AudioConfig, AudioEncoding, SpeakingStyle, SynthesisInput, SynthesisRequest, VoiceSelection,
};
use super::voices;

/// Builder for [`SynthesisRequest`].
///
/// ```rust
/// use post_tts::tts::{SpeakingStyle, SpeechRequestBuilder};
///
/// let req = SpeechRequestBuilder::new("fr-FR")
///     .style(SpeakingStyle::Calm)
///     .build("Bonjour.");
/// assert_eq!(req.voice.name, "fr-FR-Wavenet-C");
/// assert_eq!(req.audio_config.speaking_rate, 0.85);
/// ```
#[derive(Debug, Clone)]
pub struct SpeechRequestBuilder {
    language_code: String,
    voice: Option<String>,
    style: SpeakingStyle,
}

impl SpeechRequestBuilder {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            voice: None,
            style: SpeakingStyle::default(),
        }
    }

    /// Preferred voice; ignored unless it belongs to the request language.
    pub fn voice_override(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn style(mut self, style: SpeakingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn build(self, text: impl Into<String>) -> SynthesisRequest {
        let name = voices::resolve_voice(&self.language_code, self.voice.as_deref());
        let params = self.style.params();
        SynthesisRequest {
            input: SynthesisInput { text: text.into() },
            voice: VoiceSelection {
                language_code: self.language_code,
                name,
            },
            audio_config: AudioConfig {
                audio_encoding: AudioEncoding::Mp3,
                speaking_rate: params.speaking_rate,
                pitch: params.pitch,
            },
        }
    }
}

/// Builds a request from raw setting values. Unknown style names mean neutral.
pub fn build(language_code: &str, voice_override: &str, style: &str, text: &str) -> SynthesisRequest {
    SpeechRequestBuilder::new(language_code)
        .voice_override(voice_override)
        .style(SpeakingStyle::from_name_or_default(style))
        .build(text)
}
