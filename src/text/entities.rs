//! Charset-aware HTML entity decoding.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("entity pattern")
});

/// Target character encoding for decoded entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Parses an encoding label such as `"UTF-8"` or `"iso-8859-1"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" | "l1" => Some(Self::Latin1),
            "us-ascii" | "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Like [`Charset::from_label`], falling back to UTF-8 for unknown labels.
    pub fn from_label_lossy(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            tracing::warn!(label, "unknown character encoding, decoding entities as UTF-8");
            Self::Utf8
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
        }
    }

    pub fn can_encode(&self, c: char) -> bool {
        match self {
            Self::Utf8 => true,
            Self::Latin1 => (c as u32) <= 0xFF,
            Self::Ascii => c.is_ascii(),
        }
    }
}

/// Decodes named and numeric entities.
///
/// An entity whose decoded text cannot be represented in `charset`, or which is
/// not a known entity at all, is left as written.
pub fn decode_entities(text: &str, charset: Charset) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures| {
        let raw = &caps[0];
        let decoded = html_escape::decode_html_entities(raw);
        if decoded != raw && decoded.chars().all(|c| charset.can_encode(c)) {
            decoded.into_owned()
        } else {
            raw.to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_numeric_entities() {
        let out = decode_entities("&quot;A&quot; &amp; &#39;b&#39; &#x2014; &hellip;", Charset::Utf8);
        assert_eq!(out, "\"A\" & 'b' \u{2014} \u{2026}");
    }

    #[test]
    fn test_unknown_entity_is_kept() {
        assert_eq!(decode_entities("&notarealentity; x", Charset::Utf8), "&notarealentity; x");
    }

    #[test]
    fn test_latin1_keeps_unrepresentable_entities() {
        let out = decode_entities("caf&eacute; &mdash; done", Charset::Latin1);
        assert_eq!(out, "caf\u{e9} &mdash; done");
    }

    #[test]
    fn test_ascii_only_decodes_ascii() {
        let out = decode_entities("&lt;b&gt; &copy;", Charset::Ascii);
        assert_eq!(out, "<b> &copy;");
    }

    #[test]
    fn test_charset_labels() {
        assert_eq!(Charset::from_label("UTF-8"), Some(Charset::Utf8));
        assert_eq!(Charset::from_label(" iso_8859-1 "), Some(Charset::Latin1));
        assert_eq!(Charset::from_label("US-ASCII"), Some(Charset::Ascii));
        assert_eq!(Charset::from_label("koi8-r"), None);
        assert_eq!(Charset::from_label_lossy("koi8-r"), Charset::Utf8);
    }
}
