//! HTML and shortcode handling for the text pipeline.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

/// Sentence-pause marker inserted at block boundaries.
pub const PAUSE: &str = ". ";

static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|h[1-6]|figcaption|li|blockquote)\s*>").expect("block close pattern")
});
static BLOCKQUOTE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<blockquote(?:\s[^>]*)?>").expect("blockquote pattern"));
static IMG_ALT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img[^>]+alt=["']([^"']*)["'][^>]*>"#).expect("img alt pattern")
});
// [tag], [tag attr="x"], [tag /], [/tag]
static SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(/)?([A-Za-z][A-Za-z0-9_-]*)(\s[^\[\]]*?)?(/)?\]").expect("shortcode pattern")
});
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style pattern")
});
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
// A '<' directly followed by whitespace is text, not markup.
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z/!?][^>]*(?:>|$)").expect("tag pattern"));

/// Inserts a pause after paragraphs, headings, captions, list items and around blockquotes.
pub fn insert_block_pauses(text: &str) -> String {
    let text = BLOCK_CLOSE.replace_all(text, PAUSE);
    BLOCKQUOTE_OPEN.replace_all(&text, PAUSE).into_owned()
}

/// Replaces `<img>` tags by their alt text followed by a pause.
pub fn extract_alt_text(text: &str) -> String {
    IMG_ALT
        .replace_all(text, |caps: &Captures| {
            let alt = &caps[1];
            if alt.is_empty() {
                String::new()
            } else {
                format!("{}{}", alt, PAUSE)
            }
        })
        .into_owned()
}

/// Which shortcodes are removed from content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShortcodePolicy {
    /// Every shortcode-shaped token is removed: `[tag]`, `[/tag]`, `[tag /]` and
    /// `[tag key=value ...]`. Bracketed prose such as `[see below]` is kept.
    #[default]
    StripAll,
    /// Only tokens whose tag name is registered are removed.
    Registered(HashSet<String>),
}

impl ShortcodePolicy {
    pub fn registered<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Registered(tags.into_iter().map(Into::into).collect())
    }

    fn strips(&self, caps: &Captures) -> bool {
        match self {
            Self::StripAll => looks_like_shortcode(caps),
            Self::Registered(tags) => tags.contains(&caps[2]),
        }
    }
}

fn looks_like_shortcode(caps: &Captures) -> bool {
    let attrs = caps.get(3).map_or("", |m| m.as_str()).trim();
    if caps.get(1).is_some() {
        return attrs.is_empty() && caps.get(4).is_none();
    }
    attrs.is_empty() || caps.get(4).is_some() || attrs.contains('=')
}

/// Removes shortcode tags. Content enclosed by a shortcode pair is kept.
pub fn strip_shortcodes(text: &str, policy: &ShortcodePolicy) -> String {
    SHORTCODE
        .replace_all(text, |caps: &Captures| {
            if policy.strips(caps) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Removes script/style elements with their content, comments and all remaining tags.
pub fn strip_tags(text: &str) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(text, "");
    let text = COMMENT.replace_all(&text, "");
    TAG.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pauses() {
        let out = insert_block_pauses("<h2>Title</H2><p>One</p><ul><li>a</li></ul>");
        assert_eq!(out, "<h2>Title. <p>One. <ul><li>a. </ul>");
    }

    #[test]
    fn test_blockquote_open_and_close() {
        let out = insert_block_pauses(r#"x<blockquote class="wp">q</blockquote>y"#);
        assert_eq!(out, "x. q. y");
    }

    #[test]
    fn test_alt_text_extraction() {
        let out = extract_alt_text(r#"See <img src="a.png" alt="A red barn" /> and <img src="b" alt="">."#);
        assert_eq!(out, "See A red barn.  and .");
    }

    #[test]
    fn test_img_without_alt_is_left_for_tag_stripping() {
        let html = r#"<img src="a.png">"#;
        assert_eq!(extract_alt_text(html), html);
        assert_eq!(strip_tags(html), "");
    }

    #[test]
    fn test_strip_all_shortcodes() {
        let out = strip_shortcodes(
            r#"[caption id="1" align="left"]Photo[/caption] see note [1] [gallery /]"#,
            &ShortcodePolicy::StripAll,
        );
        assert_eq!(out, "Photo see note [1] ");
    }

    #[test]
    fn test_strip_all_keeps_bracketed_prose() {
        let text = "Prices went up. [Update the pricing table below] Thanks.";
        assert_eq!(strip_shortcodes(text, &ShortcodePolicy::StripAll), text);
        let out = strip_shortcodes("[embed]clip[/embed] [Editor's note] [note]", &ShortcodePolicy::StripAll);
        assert_eq!(out, "clip [Editor's note] ");
    }

    #[test]
    fn test_strip_registered_shortcodes_only() {
        let policy = ShortcodePolicy::registered(["gallery"]);
        let out = strip_shortcodes("[gallery ids=\"1,2\"] [sic]", &policy);
        assert_eq!(out, " [sic]");
    }

    #[test]
    fn test_strip_tags_drops_script_style_and_comments() {
        let out = strip_tags("<style>p{}</style>a<!-- hidden -->b<script>alert(1)</script><b>c</b>");
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_strip_tags_keeps_spaced_comparisons() {
        assert_eq!(strip_tags("5 < 10 and 10 > 5"), "5 < 10 and 10 > 5");
    }
}
