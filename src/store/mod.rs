//! Persistent string options.
//!
//! Settings and the usage ledger live behind [`OptionStore`], a flat key/value
//! seam. Two backends ship with the crate:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryOptionStore`] | tests and one-shot runs |
//! | [`JsonFileOptionStore`] | a single JSON object on disk |

mod backend;

pub use backend::{JsonFileOptionStore, MemoryOptionStore, OptionStore};

/// Option names, shared by every backend.
pub mod keys {
    pub const API_KEY: &str = "stts_google_api_key";
    pub const LANGUAGE_CODE: &str = "stts_language_code";
    pub const VOICE_NAME: &str = "stts_voice_name";
    pub const USAGE_LIMIT: &str = "stts_usage_limit";
    pub const SPEAKING_STYLE: &str = "stts_speaking_style";
    pub const PLAYER_STYLE: &str = "stts_player_style";
    pub const USAGE_DATA: &str = "stts_usage_data";
    pub const BLOG_CHARSET: &str = "blog_charset";

    /// Attachment id of a post's generated audio.
    pub fn post_audio(post_id: u64) -> String {
        format!("_stts_audio_attachment_id:{}", post_id)
    }
}
