//! Rule-based cleaning of raw chat text into the canonical form every
//! downstream stage works on.
//!
//! The output alphabet is `a-z`, space, `[`, `]` and `_`. Structural noise is
//! replaced by bracketed placeholders before the character filter runs, so the
//! placeholders survive it intact.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder for a fenced (triple backtick) code block.
pub const CODE_BLOCK: &str = "[code_block]";
/// Placeholder for an inline code span.
pub const INLINE_CODE: &str = "[inline_code]";
/// Placeholder for a user mention.
pub const MENTION: &str = "[mention]";
/// Placeholder for a custom or animated emoji tag.
pub const EMOJI: &str = "[emoji]";
/// Placeholder for a link.
pub const URL: &str = "[url]";

/// Every structural placeholder the normalizer can emit.
pub const PLACEHOLDERS: [&str; 5] = [MENTION, EMOJI, URL, CODE_BLOCK, INLINE_CODE];

static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code block pattern"));
static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`.*?`").expect("inline code pattern"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@!?\d+>").expect("mention pattern"));
static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a?:.+?:\d+>").expect("emoji pattern"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s\[\]_]").expect("charset pattern"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Stateless text normalizer.
///
/// Rules run in a fixed order; each replacement is padded with spaces so a
/// placeholder never fuses with neighbouring letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        TextNormalizer
    }

    /// Clean one raw string.
    ///
    /// # Arguments
    /// * `text` - raw message text
    ///
    /// # Returns
    /// * `String` - lowercase text over `{a-z, ' ', '[', ']', '_'}`, single
    ///   spaced and trimmed; empty for empty or all-noise input
    pub fn normalize(&self, text: &str) -> String {
        let text = CODE_BLOCK_RE.replace_all(text, " [code_block] ");
        let text = INLINE_CODE_RE.replace_all(&text, " [inline_code] ");
        let text = MENTION_RE.replace_all(&text, " [mention] ");
        let text = EMOJI_RE.replace_all(&text, " [emoji] ");
        let text = URL_RE.replace_all(&text, " [url] ");

        let text = text.to_lowercase();
        let text = DISALLOWED_RE.replace_all(&text, "");
        let text = WHITESPACE_RE.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Missing text degrades to the empty string.
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    pub fn normalize_batch<T>(&self, texts: &[T]) -> Vec<String>
    where
        T: AsRef<str>,
    {
        texts.iter().map(|t| self.normalize(t.as_ref())).collect()
    }
}

/// true when `token` is one of the structural placeholders
#[inline]
pub fn is_placeholder(token: &str) -> bool {
    PLACEHOLDERS.contains(&token)
}
