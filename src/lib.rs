//! # post-tts
//!
//! Turns blog post HTML into spoken audio through the Google Cloud
//! Text-to-Speech API.
//!
//! ## Overview
//!
//! The crate owns everything between "here is a post" and "here is a playable
//! file": cleaning markup into speech-safe text, keeping a monthly character
//! budget, composing the synthesis request, checking that what came back is
//! really audio, and storing it.
//!
//! Persistence is behind two seams, [`store::OptionStore`] for settings and
//! usage, and [`media::MediaStore`] for audio files, so the same pipeline runs
//! against memory in tests and against disk in the CLI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use post_tts::generator::{AudioGenerator, PostContent};
//! use post_tts::media::LocalMediaStore;
//! use post_tts::store::{keys, JsonFileOptionStore, OptionStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> post_tts::Result<()> {
//!     let options = Arc::new(JsonFileOptionStore::new("options.json"));
//!     options.set(keys::API_KEY, "your-api-key").await?;
//!     let media = Arc::new(LocalMediaStore::open("audio", "https://example.com/audio").await?);
//!
//!     let generator = AudioGenerator::new(options, media);
//!     let post = PostContent::new(42, "Hello", "<p>First post &amp; more.</p>");
//!     let audio = generator.generate(&post).await?;
//!     println!("{} ({})", audio.url, audio.file_size_formatted);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`text`] | HTML to speech text normalization |
//! | [`usage`] | Monthly usage ledger and limit checks |
//! | [`audio`] | Audio formats and magic-byte validation |
//! | [`tts`] | Request building, voice tables, synthesis client |
//! | [`store`] | Option store seam and backends |
//! | [`config`] | Typed settings over the option store |
//! | [`media`] | Media store seam and local backend |
//! | [`generator`] | The generate/delete/status workflow |

pub mod audio;
pub mod config;
pub mod error_code;
pub mod generator;
pub mod media;
pub mod store;
pub mod text;
pub mod tts;
pub mod usage;

pub use config::{Settings, SettingsUpdate};
pub use error_code::ErrorCode;
pub use generator::{AudioGenerator, GeneratedAudio, PostContent};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
