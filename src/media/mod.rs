//! Storage for generated audio files.
//!
//! [`MediaStore`] is the seam between audio generation and wherever files
//! end up. [`LocalMediaStore`] writes into a directory served under a base URL.

mod local;

pub use local::LocalMediaStore;

use crate::audio::AudioFormat;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file held by a [`MediaStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
    pub id: u64,
    pub url: String,
    pub path: PathBuf,
    pub file_size: u64,
    pub format: AudioFormat,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persists `bytes` under a name derived from `filename`.
    ///
    /// The store may alter the name to keep it unique.
    async fn store(&self, bytes: &[u8], filename: &str, format: AudioFormat) -> Result<StoredMedia>;
    async fn get(&self, id: u64) -> Result<Option<StoredMedia>>;
    /// Returns whether anything was deleted.
    async fn delete(&self, id: u64) -> Result<bool>;
    fn name(&self) -> &'static str;
}

/// Name for a post's audio file: `{title}-audio-{unix_ts}.{ext}`, sanitized.
pub fn audio_file_name(title: &str, unix_ts: i64, format: AudioFormat) -> String {
    sanitize_file_name(&format!("{}-audio-{}.{}", title, unix_ts, format.extension()))
}

/// Reduces `name` to characters safe in a file name and a URL.
///
/// Whitespace becomes `-`, letters, digits and `-_.` are kept, anything else
/// is dropped. Runs of `-` collapse, and leading or trailing `-_.` are trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let mapped = if c.is_whitespace() {
            '-'
        } else if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
            c
        } else {
            continue;
        };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }
    let trimmed = out.trim_matches(|c| matches!(c, '-' | '_' | '.'));
    if trimmed.is_empty() {
        "unnamed-file".to_string()
    } else {
        trimmed.to_string()
    }
}

const SIZE_UNITS: [(&str, u64); 5] = [
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
    ("B", 1),
];

/// Human-readable size with two decimals, e.g. `1.50 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let (unit, magnitude) = SIZE_UNITS
        .iter()
        .copied()
        .find(|(_, mag)| bytes >= *mag)
        .unwrap_or(("B", 1));
    let value = format!("{:.2}", bytes as f64 / magnitude as f64);
    format!("{} {}", group_thousands(&value), unit)
}

fn group_thousands(number: &str) -> String {
    let (int, frac) = number.split_once('.').unwrap_or((number, ""));
    let mut grouped = String::with_capacity(number.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
