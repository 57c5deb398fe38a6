//! TTS: request assembly, voice tables and the Google Cloud synthesis client.

mod builder;
mod client;
mod types;
pub mod voices;

pub use builder::{build, SpeechRequestBuilder};
pub use client::{
    decode_audio_content, SpeechSynthesizer, TtsClient, TtsClientBuilder, API_KEY_ENV,
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT_PATH, DEFAULT_TIMEOUT_SECS, UNKNOWN_API_ERROR,
};
pub use types::{
    AudioConfig, AudioEncoding, PlayerStyle, SpeakingStyle, StyleParams, SynthesisInput,
    SynthesisRequest, VoiceSelection,
};
pub use voices::{Gender, Language, VoiceOption};
