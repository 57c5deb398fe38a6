//! Magic-byte classification of decoded audio.
//!
//! The synthesis service's declared content type is not trusted; the bytes
//! themselves must look like a known container before anything is stored.

use super::format::AudioFormat;
use crate::{Error, Result};

/// Bytes inspected for a signature; shorter buffers are rejected outright.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSignature {
    pub name: &'static str,
    pub format: AudioFormat,
    pub magic: &'static [u8],
    pub offset: usize,
}

/// Checked in order; the first match wins.
pub static SIGNATURES: [AudioSignature; 9] = [
    AudioSignature { name: "mp3_id3", format: AudioFormat::Mp3, magic: b"ID3", offset: 0 },
    AudioSignature { name: "mp3_mpeg1", format: AudioFormat::Mp3, magic: &[0xFF, 0xFB], offset: 0 },
    AudioSignature { name: "mp3_mpeg2", format: AudioFormat::Mp3, magic: &[0xFF, 0xF3], offset: 0 },
    AudioSignature { name: "mp3_mpeg25", format: AudioFormat::Mp3, magic: &[0xFF, 0xF2], offset: 0 },
    AudioSignature { name: "wav", format: AudioFormat::Wav, magic: b"RIFF", offset: 0 },
    AudioSignature { name: "ogg", format: AudioFormat::Ogg, magic: b"OggS", offset: 0 },
    AudioSignature { name: "m4a", format: AudioFormat::M4a, magic: b"ftyp", offset: 4 },
    AudioSignature { name: "flac", format: AudioFormat::Flac, magic: b"fLaC", offset: 0 },
    AudioSignature { name: "webm", format: AudioFormat::Webm, magic: &[0x1A, 0x45, 0xDF, 0xA3], offset: 0 },
];

impl AudioSignature {
    fn matches(&self, header: &[u8]) -> bool {
        header
            .get(self.offset..self.offset + self.magic.len())
            .is_some_and(|window| window == self.magic)
    }
}

/// Returns the first signature matching the header of `bytes`.
pub fn match_signature(bytes: &[u8]) -> Option<&'static AudioSignature> {
    if bytes.len() < HEADER_LEN {
        return None;
    }
    let header = &bytes[..HEADER_LEN];
    SIGNATURES.iter().find(|sig| sig.matches(header))
}

/// Classifies `bytes`, or `None` when they are too short or match nothing.
pub fn sniff(bytes: &[u8]) -> Option<AudioFormat> {
    match_signature(bytes).map(|sig| sig.format)
}

/// Classifies decoded audio by its leading bytes.
///
/// # Errors
///
/// - [`Error::InvalidAudioContent`] for an empty buffer or one shorter than [`HEADER_LEN`]
/// - [`Error::UnrecognizedAudioFormat`] when no signature matches
pub fn validate(bytes: &[u8]) -> Result<AudioFormat> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::InvalidAudioContent { len: bytes.len() });
    }
    match match_signature(bytes) {
        Some(sig) => {
            tracing::debug!(signature = sig.name, format = %sig.format, "audio signature matched");
            Ok(sig.format)
        }
        None => Err(Error::UnrecognizedAudioFormat),
    }
}
