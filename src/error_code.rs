//! Stable error codes.
//!
//! Every [`Error`](crate::Error) maps to one of these codes. The names match the
//! codes the plugin front end already understands (`usage_limit_exceeded`,
//! `api_error`, ...), so they can be handed to a REST layer unchanged.
//!
//! ## Example
//!
//! ```rust
//! use post_tts::error_code::ErrorCode;
//!
//! let code = ErrorCode::from_name("usage_limit_exceeded").unwrap();
//! assert_eq!(code.http_status(), 429);
//! assert!(!code.retryable());
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No API key stored or passed to the client builder
    MissingApiKey,
    /// Post produced no speakable text
    EmptyText,
    /// Malformed input or parameters
    InvalidRequest,
    /// Client or settings misconfiguration
    Configuration,
    /// Monthly character quota would be exceeded
    UsageLimitExceeded,
    /// Synthesis service answered with a non-200 status
    ApiError,
    /// 200 answer without `audioContent`
    InvalidResponse,
    /// `audioContent` was not valid base64
    DecodeError,
    /// Decoded audio empty or shorter than a header
    InvalidAudio,
    /// Decoded audio matched no known signature
    InvalidAudioFormat,
    /// Writing the audio file failed
    SaveError,
    /// No audio linked to the given post
    NoAudio,
    /// Transport failure talking to the synthesis service
    NetworkError,
    Unknown,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 14] = [
        Self::MissingApiKey,
        Self::EmptyText,
        Self::InvalidRequest,
        Self::Configuration,
        Self::UsageLimitExceeded,
        Self::ApiError,
        Self::InvalidResponse,
        Self::DecodeError,
        Self::InvalidAudio,
        Self::InvalidAudioFormat,
        Self::SaveError,
        Self::NoAudio,
        Self::NetworkError,
        Self::Unknown,
    ];

    /// Returns the code name (e.g., `"invalid_audio_format"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::EmptyText => "empty_text",
            Self::InvalidRequest => "invalid_request",
            Self::Configuration => "configuration_error",
            Self::UsageLimitExceeded => "usage_limit_exceeded",
            Self::ApiError => "api_error",
            Self::InvalidResponse => "invalid_response",
            Self::DecodeError => "decode_error",
            Self::InvalidAudio => "invalid_audio",
            Self::InvalidAudioFormat => "invalid_audio_format",
            Self::SaveError => "save_error",
            Self::NoAudio => "no_audio",
            Self::NetworkError => "network_error",
            Self::Unknown => "unknown",
        }
    }

    /// Suggested HTTP status for a REST layer reporting this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmptyText | Self::InvalidRequest => 400,
            Self::NoAudio => 404,
            Self::UsageLimitExceeded => 429,
            Self::ApiError
            | Self::InvalidResponse
            | Self::DecodeError
            | Self::InvalidAudio
            | Self::InvalidAudioFormat
            | Self::NetworkError => 502,
            Self::MissingApiKey | Self::Configuration | Self::SaveError | Self::Unknown => 500,
        }
    }

    /// Whether repeating the same request may succeed without changing anything.
    ///
    /// The core never retries by itself; this is a hint for caller policy.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::InvalidResponse)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
