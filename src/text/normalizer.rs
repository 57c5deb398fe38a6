//! The ordered text-preparation pipeline.

use super::entities::{decode_entities, Charset};
use super::markup::{self, ShortcodePolicy};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum size of prepared text, in bytes. This is the synthesis service's request limit.
pub const MAX_TEXT_BYTES: usize = 5000;

const SMART_PUNCTUATION: [(char, &str); 10] = [
    ('\u{2018}', "'"),  // left single quotation mark
    ('\u{2019}', "'"),  // right single quotation mark
    ('\u{201C}', "\""), // left double quotation mark
    ('\u{201D}', "\""), // right double quotation mark
    ('\u{2032}', "'"),  // prime
    ('\u{2033}', "\""), // double prime
    ('\u{2014}', " "),  // em dash
    ('\u{2013}', " "),  // en dash
    ('\u{2026}', "."),  // ellipsis
    ('`', ""),
];

const PUNCTUATION_TO_SPACE: [char; 14] = [
    '_', '/', '\\', '(', ')', '[', ']', '{', '}', '*', '#', '@', '%', '^',
];

static SPACED_HYPHEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s+").expect("hyphen pattern"));
static SPACED_GT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+>\s+").expect("gt pattern"));
static SPACED_LT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+<\s+").expect("lt pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static PERIOD_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?:\s*\.)+").expect("period run pattern"));

/// Converts post HTML into plain text that reads well through a speech engine.
///
/// The steps run in a fixed order and later steps rely on earlier ones:
///
/// 1. decode HTML entities for the configured charset
/// 2. add a pause after paragraphs, headings, captions, list items and blockquotes
/// 3. replace images by their alt text
/// 4. strip shortcodes, then every remaining tag
/// 5. fold typographic quotes, primes, dashes and ellipses to ASCII
/// 6. `&` becomes "and"
/// 7. `;` becomes a pause
/// 8. `:` becomes a pause unless it sits between two digits (`10:00`)
/// 9. a free-standing ` - ` becomes a pause, in-word hyphens stay
/// 10. free-standing `>` and `<` keep exactly one space on each side
/// 11. `_` becomes a space
/// 12. `/ \ ( ) [ ] { } * # @ % ^` become spaces
/// 13. `"` is removed
/// 14. whitespace is collapsed and trimmed
/// 15. runs of periods, with or without whitespace between them, collapse to one
/// 16. the result is cut to [`MAX_TEXT_BYTES`]
///
/// Entity decoding must precede quote folding, which must precede the ampersand
/// rule, and so on down the list. The normalizer never fails; an input with
/// nothing speakable yields an empty string.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    charset: Charset,
    shortcodes: ShortcodePolicy,
}

impl TextNormalizer {
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            shortcodes: ShortcodePolicy::default(),
        }
    }

    /// Builds a normalizer from an encoding label such as a site's `blog_charset`.
    pub fn for_encoding(label: &str) -> Self {
        Self::new(Charset::from_label_lossy(label))
    }

    pub fn with_shortcodes(mut self, policy: ShortcodePolicy) -> Self {
        self.shortcodes = policy;
        self
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn normalize(&self, raw_html: &str) -> String {
        let text = decode_entities(raw_html, self.charset);
        let text = markup::insert_block_pauses(&text);
        let text = markup::extract_alt_text(&text);
        let text = markup::strip_shortcodes(&text, &self.shortcodes);
        let text = markup::strip_tags(&text);

        let text = fold_smart_punctuation(&text);
        let text = text.replace('&', " and ");
        let text = text.replace(';', markup::PAUSE);
        let text = replace_clause_colons(&text);
        let text = SPACED_HYPHEN.replace_all(&text, markup::PAUSE);
        let text = SPACED_GT.replace_all(&text, " > ");
        let text = SPACED_LT.replace_all(&text, " < ");
        let text = text.replace(|c: char| PUNCTUATION_TO_SPACE.contains(&c), " ");
        let text = text.replace('"', "");

        let text = WHITESPACE.replace_all(&text, " ");
        let text = PERIOD_RUN.replace_all(text.trim(), ".");

        truncate_to_limit(&text, MAX_TEXT_BYTES)
    }
}

/// Normalizes `raw_html` decoding entities with the named character encoding.
///
/// Unknown encoding labels fall back to UTF-8.
pub fn normalize(raw_html: &str, character_encoding: &str) -> String {
    TextNormalizer::for_encoding(character_encoding).normalize(raw_html)
}

fn fold_smart_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match SMART_PUNCTUATION.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

fn replace_clause_colons(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if c != ':' {
            out.push(c);
            continue;
        }
        let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
        let digit_after = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if digit_before && digit_after {
            out.push(':');
        } else {
            out.push_str(markup::PAUSE);
        }
    }
    out
}

/// Cuts `text` to at most `max_bytes`, backing off to a char boundary.
///
/// A cut through a time such as `10:00` leaves a colon with no digit after it;
/// it becomes the period step 8 would have made of it, so the output is stable
/// under another pass.
fn truncate_to_limit(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let cut = text[..end].trim_end();
    match cut.strip_suffix(':') {
        Some(head) => format!("{}.", head),
        None => cut.to_string(),
    }
}
