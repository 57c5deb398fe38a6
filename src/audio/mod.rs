//! Audio formats and content validation.

mod format;
mod validator;

pub use format::{
    is_allowed_extension, is_allowed_mime_type, AudioFormat, ALLOWED_EXTENSIONS,
    ALLOWED_MIME_TYPES,
};
pub use validator::{match_signature, sniff, validate, AudioSignature, HEADER_LEN, SIGNATURES};
