//! Text preparation: turns post HTML into speech-safe plain text.
//!
//! ```rust
//! use post_tts::text::normalize;
//!
//! let text = normalize("<h2>Setup</h2><p>Open Settings &amp; choose a voice.</p>", "UTF-8");
//! assert_eq!(text, "Setup. Open Settings and choose a voice.");
//! ```

mod entities;
mod markup;
mod normalizer;

pub use entities::{decode_entities, Charset};
pub use markup::ShortcodePolicy;
pub use normalizer::{normalize, TextNormalizer, MAX_TEXT_BYTES};
