//! Browser-playable audio container formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    M4a,
    Flac,
    Webm,
}

/// MIME types accepted for uploaded audio.
pub const ALLOWED_MIME_TYPES: [&str; 10] = [
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/webm",
    "audio/mp4",
    "audio/aac",
    "audio/flac",
    "audio/x-m4a",
    "audio/x-wav",
];

/// File extensions accepted for uploaded audio.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["mp3", "wav", "ogg", "oga", "webm", "m4a", "aac", "flac"];

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::M4a => "m4a",
            Self::Flac => "flac",
            Self::Webm => "webm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::M4a => "audio/mp4",
            Self::Flac => "audio/flac",
            Self::Webm => "audio/webm",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Maps an allowed MIME type, including common aliases, to its format.
    ///
    /// `audio/aac` maps to [`AudioFormat::M4a`], the container raw AAC is usually served in.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let mime = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match mime.as_str() {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/mp4" | "audio/x-m4a" | "audio/aac" => Some(Self::M4a),
            "audio/flac" => Some(Self::Flac),
            "audio/webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "ogg" | "oga" => Some(Self::Ogg),
            "m4a" | "aac" => Some(Self::M4a),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_extension(s)
            .ok_or_else(|| crate::Error::validation(format!("unsupported audio format '{}'", s)))
    }
}

/// Whether an uploaded attachment's MIME type is playable by the front-end player.
pub fn is_allowed_mime_type(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&mime.as_str())
}

/// Whether a file name carries an allowed audio extension.
pub fn is_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_aliases() {
        assert_eq!(AudioFormat::from_mime_type("audio/mp3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_mime_type("audio/x-wav"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::from_mime_type("Audio/MP4; codecs=mp4a"), Some(AudioFormat::M4a));
        assert_eq!(AudioFormat::from_mime_type("video/mp4"), None);
    }

    #[test]
    fn test_every_allowed_mime_maps_to_a_format() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(AudioFormat::from_mime_type(mime).is_some(), "{mime}");
            assert!(is_allowed_mime_type(mime));
        }
        assert!(!is_allowed_mime_type("audio/midi"));
    }

    #[test]
    fn test_extensions() {
        assert!(is_allowed_extension("episode.OGA"));
        assert!(!is_allowed_extension("episode.exe"));
        assert!(!is_allowed_extension("noextension"));
        assert_eq!("oga".parse::<AudioFormat>().unwrap(), AudioFormat::Ogg);
        assert!("mid".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&AudioFormat::Webm).unwrap(), "\"webm\"");
    }
}
