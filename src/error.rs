use crate::error_code::ErrorCode;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option key or field that caused the error (e.g., "stts_usage_limit", "request.voice.name")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "tts_client", "settings")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for post-tts.
///
/// Every variant is a structured result the caller can inspect; nothing here is
/// retried automatically. Use [`Error::code`] for a stable machine-readable code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Google Cloud API key is not configured. Please set it in the plugin settings.")]
    MissingApiKey,

    #[error("No text content found to convert to speech.")]
    EmptyText,

    #[error("No audio file found for post {post_id}.")]
    NoAudio { post_id: u64 },

    #[error(
        "Monthly character limit exceeded. You have used {current_usage} of {limit} characters this month. Usage resets on the 1st of next month."
    )]
    UsageLimitExceeded { current_usage: u64, limit: u64 },

    #[error("Audio content is empty or too small ({len} bytes)")]
    InvalidAudioContent { len: usize },

    #[error("File does not appear to be a valid audio format. Only browser-compatible audio files are allowed.")]
    UnrecognizedAudioFormat,

    #[error("Failed to decode audio content: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Non-200 answer from the synthesis service; `message` is passed through verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Invalid response from synthesis service: {message}")]
    InvalidResponse { message: String },

    #[error("Network transport error: {message}{}", format_context(.context))]
    Network {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new network error with structured context
    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Network { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Stable code for this error, suitable for API responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Configuration { .. } => ErrorCode::Configuration,
            Error::Validation { .. } => ErrorCode::InvalidRequest,
            Error::MissingApiKey => ErrorCode::MissingApiKey,
            Error::EmptyText => ErrorCode::EmptyText,
            Error::NoAudio { .. } => ErrorCode::NoAudio,
            Error::UsageLimitExceeded { .. } => ErrorCode::UsageLimitExceeded,
            Error::InvalidAudioContent { .. } => ErrorCode::InvalidAudio,
            Error::UnrecognizedAudioFormat => ErrorCode::InvalidAudioFormat,
            Error::Decode(_) => ErrorCode::DecodeError,
            Error::Remote { .. } => ErrorCode::ApiError,
            Error::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            Error::Network { .. } => ErrorCode::NetworkError,
            Error::Io(_) => ErrorCode::SaveError,
            Error::Serialization(_) => ErrorCode::Unknown,
        }
    }
}
