//! Supported languages and their voices.
//!
//! The tables are static; lookups go through indexes built once on first use.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Voice used when a language code is not in the table.
pub const FALLBACK_VOICE: &str = "en-US-Wavenet-D";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub default_voice: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceOption {
    pub name: String,
    pub label: String,
    pub gender: Option<Gender>,
}

const fn lang(code: &'static str, name: &'static str, default_voice: &'static str) -> Language {
    Language {
        code,
        name,
        default_voice,
    }
}

static LANGUAGES: [Language; 57] = [
    lang("af-ZA", "Afrikaans (South Africa)", "af-ZA-Standard-A"),
    lang("ar-XA", "Arabic", "ar-XA-Wavenet-A"),
    lang("bn-IN", "Bengali (India)", "bn-IN-Wavenet-A"),
    lang("bg-BG", "Bulgarian (Bulgaria)", "bg-BG-Standard-B"),
    lang("ca-ES", "Catalan (Spain)", "ca-ES-Standard-B"),
    lang("yue-HK", "Cantonese (Hong Kong)", "yue-HK-Standard-A"),
    lang("cs-CZ", "Czech (Czech Republic)", "cs-CZ-Wavenet-B"),
    lang("da-DK", "Danish (Denmark)", "da-DK-Wavenet-F"),
    lang("nl-NL", "Dutch (Netherlands)", "nl-NL-Wavenet-F"),
    lang("nl-BE", "Dutch (Belgium)", "nl-BE-Wavenet-C"),
    lang("en-AU", "English (Australia)", "en-AU-Wavenet-B"),
    lang("en-IN", "English (India)", "en-IN-Wavenet-A"),
    lang("en-GB", "English (UK)", "en-GB-Wavenet-B"),
    lang("en-US", "English (US)", "en-US-Wavenet-D"),
    lang("fil-PH", "Filipino (Philippines)", "fil-PH-Wavenet-A"),
    lang("fi-FI", "Finnish (Finland)", "fi-FI-Wavenet-B"),
    lang("fr-CA", "French (Canada)", "fr-CA-Wavenet-A"),
    lang("fr-FR", "French (France)", "fr-FR-Wavenet-C"),
    lang("gl-ES", "Galician (Spain)", "gl-ES-Standard-B"),
    lang("de-DE", "German (Germany)", "de-DE-Wavenet-F"),
    lang("el-GR", "Greek (Greece)", "el-GR-Wavenet-B"),
    lang("gu-IN", "Gujarati (India)", "gu-IN-Wavenet-A"),
    lang("he-IL", "Hebrew (Israel)", "he-IL-Wavenet-A"),
    lang("hi-IN", "Hindi (India)", "hi-IN-Wavenet-A"),
    lang("hu-HU", "Hungarian (Hungary)", "hu-HU-Wavenet-B"),
    lang("is-IS", "Icelandic (Iceland)", "is-IS-Standard-B"),
    lang("id-ID", "Indonesian (Indonesia)", "id-ID-Wavenet-A"),
    lang("it-IT", "Italian (Italy)", "it-IT-Wavenet-A"),
    lang("ja-JP", "Japanese (Japan)", "ja-JP-Wavenet-A"),
    lang("kn-IN", "Kannada (India)", "kn-IN-Wavenet-A"),
    lang("ko-KR", "Korean (South Korea)", "ko-KR-Wavenet-A"),
    lang("lv-LV", "Latvian (Latvia)", "lv-LV-Standard-B"),
    lang("lt-LT", "Lithuanian (Lithuania)", "lt-LT-Standard-B"),
    lang("ms-MY", "Malay (Malaysia)", "ms-MY-Wavenet-A"),
    lang("ml-IN", "Malayalam (India)", "ml-IN-Wavenet-A"),
    lang("cmn-CN", "Mandarin Chinese (China)", "cmn-CN-Wavenet-A"),
    lang("cmn-TW", "Mandarin Chinese (Taiwan)", "cmn-TW-Wavenet-A"),
    lang("mr-IN", "Marathi (India)", "mr-IN-Wavenet-A"),
    lang("nb-NO", "Norwegian (Norway)", "nb-NO-Wavenet-F"),
    lang("pl-PL", "Polish (Poland)", "pl-PL-Wavenet-F"),
    lang("pt-BR", "Portuguese (Brazil)", "pt-BR-Wavenet-A"),
    lang("pt-PT", "Portuguese (Portugal)", "pt-PT-Wavenet-E"),
    lang("pa-IN", "Punjabi (India)", "pa-IN-Wavenet-A"),
    lang("ro-RO", "Romanian (Romania)", "ro-RO-Wavenet-B"),
    lang("ru-RU", "Russian (Russia)", "ru-RU-Wavenet-A"),
    lang("sr-RS", "Serbian (Serbia)", "sr-RS-Standard-B"),
    lang("sk-SK", "Slovak (Slovakia)", "sk-SK-Wavenet-B"),
    lang("es-ES", "Spanish (Spain)", "es-ES-Wavenet-B"),
    lang("es-US", "Spanish (United States)", "es-US-Wavenet-A"),
    lang("sv-SE", "Swedish (Sweden)", "sv-SE-Wavenet-A"),
    lang("ta-IN", "Tamil (India)", "ta-IN-Wavenet-A"),
    lang("te-IN", "Telugu (India)", "te-IN-Standard-A"),
    lang("th-TH", "Thai (Thailand)", "th-TH-Neural2-C"),
    lang("tr-TR", "Turkish (Turkey)", "tr-TR-Wavenet-A"),
    lang("uk-UA", "Ukrainian (Ukraine)", "uk-UA-Wavenet-B"),
    lang("ur-IN", "Urdu (India)", "ur-IN-Wavenet-A"),
    lang("vi-VN", "Vietnamese (Vietnam)", "vi-VN-Wavenet-A"),
];

use Gender::{Female as F, Male as M};

/// WaveNet voices for languages that offer a choice, as (voice letter, gender).
static VOICE_CHOICES: [(&str, &[(char, Gender)]); 22] = [
    ("cmn-CN", &[('A', F), ('B', M), ('C', M), ('D', F)]),
    ("da-DK", &[('A', F), ('C', M), ('D', F), ('E', F)]),
    ("de-DE", &[('A', F), ('B', M), ('C', F), ('D', M), ('E', M), ('F', F)]),
    ("en-AU", &[('A', F), ('B', M), ('C', F), ('D', M)]),
    ("en-GB", &[('A', F), ('B', M), ('C', F), ('D', M), ('F', F)]),
    ("en-IN", &[('A', F), ('B', M), ('C', M), ('D', F)]),
    (
        "en-US",
        &[
            ('A', M), ('B', M), ('C', F), ('D', M), ('E', F),
            ('F', F), ('G', F), ('H', F), ('I', M), ('J', M),
        ],
    ),
    ("es-ES", &[('B', M), ('C', F), ('D', F)]),
    ("es-US", &[('A', F), ('B', M), ('C', M)]),
    ("fr-CA", &[('A', F), ('B', M), ('C', F), ('D', M)]),
    ("fr-FR", &[('A', F), ('B', M), ('C', F), ('D', M)]),
    ("hi-IN", &[('A', F), ('B', M), ('C', M), ('D', F)]),
    ("it-IT", &[('A', F), ('B', F), ('C', M), ('D', M)]),
    ("ja-JP", &[('A', F), ('B', F), ('C', M), ('D', M)]),
    ("ko-KR", &[('A', F), ('B', F), ('C', M), ('D', M)]),
    ("nl-NL", &[('A', F), ('B', M), ('C', M), ('D', F), ('E', F)]),
    ("pl-PL", &[('A', F), ('B', M), ('C', M), ('D', F), ('E', F)]),
    ("pt-BR", &[('A', F), ('B', M), ('C', F)]),
    ("pt-PT", &[('A', F), ('B', M), ('C', M), ('D', F)]),
    ("ru-RU", &[('A', F), ('B', M), ('C', F), ('D', M), ('E', F)]),
    ("sv-SE", &[('A', F), ('B', F), ('C', F)]),
    ("tr-TR", &[('A', F), ('B', M), ('C', F), ('D', F), ('E', M)]),
];

static LANGUAGE_INDEX: Lazy<HashMap<&'static str, &'static Language>> =
    Lazy::new(|| LANGUAGES.iter().map(|l| (l.code, l)).collect());

static VOICE_INDEX: Lazy<HashMap<&'static str, &'static [(char, Gender)]>> =
    Lazy::new(|| VOICE_CHOICES.iter().map(|(code, voices)| (*code, *voices)).collect());

/// All supported languages, in display order.
pub fn languages() -> &'static [Language] {
    &LANGUAGES
}

pub fn language(code: &str) -> Option<&'static Language> {
    LANGUAGE_INDEX.get(code).copied()
}

/// Display name for `code`, or the code itself when unknown.
pub fn language_name(code: &str) -> &str {
    language(code).map(|l| l.name).unwrap_or(code)
}

/// Default voice for `code`, or [`FALLBACK_VOICE`] for unknown languages.
pub fn default_voice(code: &str) -> &'static str {
    language(code).map(|l| l.default_voice).unwrap_or(FALLBACK_VOICE)
}

/// Picks the voice for `language_code`.
///
/// A non-empty `preferred` voice wins when it belongs to the language (its name
/// starts with the language code); otherwise the table default is used.
pub fn resolve_voice(language_code: &str, preferred: Option<&str>) -> String {
    match preferred.map(str::trim) {
        Some(voice) if !voice.is_empty() && voice.starts_with(language_code) => voice.to_string(),
        _ => default_voice(language_code).to_string(),
    }
}

/// Voices selectable for `code`.
///
/// Languages without a choice list expose their default voice only.
pub fn voices_for_language(code: &str) -> Vec<VoiceOption> {
    match VOICE_INDEX.get(code) {
        Some(voices) => voices
            .iter()
            .map(|(letter, gender)| VoiceOption {
                name: format!("{}-Wavenet-{}", code, letter),
                label: format!(
                    "Voice {} ({})",
                    letter,
                    match gender {
                        Gender::Female => "Female",
                        Gender::Male => "Male",
                    }
                ),
                gender: Some(*gender),
            })
            .collect(),
        None => vec![VoiceOption {
            name: default_voice(code).to_string(),
            label: "Default Voice".to_string(),
            gender: None,
        }],
    }
}
