//! HTML/text cleaning pipeline for feed and article snippets

use crate::entities::decode_entities;
use regex::Regex;
use tracing::debug;

/// Results shorter than this collapse to an empty string
const MIN_DISPLAY_LENGTH: usize = 3;

/// Hard cap for cleaned display text
const MAX_DISPLAY_LENGTH: usize = 500;

/// Window before the cap in which a space is accepted as a cut point
const BOUNDARY_WINDOW: usize = 100;

/// Minimum length for [`is_valid_cleaned_content`]
const MIN_VALID_LENGTH: usize = 10;

/// Minimum count of substantial words for [`is_valid_cleaned_content`]
const MIN_SUBSTANTIAL_WORDS: usize = 3;

/// Characters that count as ordinary prose besides alphanumerics and spaces
const BASIC_PUNCTUATION: &str = ".,!?;:'\"()-";

// Tag handling

static CDATA_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

static ANCHOR_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").unwrap());

pub(crate) static BOLD_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?is)<(?:b|strong)\b[^>]*>(.*?)</(?:b|strong)>").unwrap()
});

pub(crate) static ITALIC_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<(?:i|em)\b[^>]*>(.*?)</(?:i|em)>").unwrap());

static HEADING_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]>").unwrap());

static PARAGRAPH_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());

static DIV_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<div\b[^>]*>(.*?)</div>").unwrap());

static SPAN_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span>").unwrap());

static FONT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<font\b[^>]*>.*?</font>").unwrap());

pub(crate) static SCRIPT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());

pub(crate) static STYLE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());

static COMMENT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

pub(crate) static TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

// Link and address removal

static URL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|ftp://|www\.)[^\s<>"']+"#).unwrap()
});

static EMAIL_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

// Source attribution, all anchored at the ends of the string

static DASH_SOURCE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"\s+[-–—]\s+[A-Z][A-Za-z&.'’]*(?:\s+(?:[A-Z][A-Za-z&.'’]*|of|the|and)){0,4}\s*$")
        .unwrap()
});

static VIA_SOURCE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"\s+(?i:via)\s+[A-Z][A-Za-z0-9&.'’-]*(?:\s+[A-Z][A-Za-z0-9&.'’-]*){0,3}\s*$")
        .unwrap()
});

static PIPE_SOURCE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+\|\s*[^|]*$").unwrap());

static BYLINE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"\s+by\s+[A-Z][A-Za-z.'’-]*(?:\s+[A-Z][A-Za-z.'’-]*){0,3}\s*$").unwrap()
});

static ACCORDING_TO_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+(?i:according\s+to)\s+.{1,80}\s*$").unwrap());

static REPORTS_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"\s+(?i:reports)\s+[A-Z][A-Za-z0-9&.,'’ -]{0,60}\s*$").unwrap()
});

static LEADING_DASH_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^\s*[-–—]\s+").unwrap());

// Normalization and cleanup

static CTA_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:read more|continue reading|click here|full story|learn more|see more)\s*[.…]{0,3}\s*$")
        .unwrap()
});

static WHITESPACE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+").unwrap());

static WORD_CHAR_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\w").unwrap());

static LEADING_PUNCT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[.,;:!?]+\s*").unwrap());

static STRAY_PUNCT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+[.,;:!?]+$").unwrap());

// Title-specific patterns

static CATEGORY_PREFIX_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^\s*\[[^\]]*\]\s*").unwrap());

static CAPS_SUFFIX_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+[-–—]\s+[A-Z0-9][A-Z0-9&.\s]{1,29}$").unwrap());

/// Clean an HTML/RSS snippet into plain display text
///
/// Runs a fixed sequence of passes: CDATA unwrapping, inline tag
/// extraction, removal of non-content blocks, residual tag stripping,
/// entity decoding, URL/email removal, source-attribution stripping,
/// whitespace normalization, trailing call-to-action removal, and a final
/// cleanup that caps the result at 500 characters. Empty or markup-only
/// input yields an empty string; this function never fails.
#[must_use]
pub fn clean_html_content(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let text = unwrap_cdata(input);
    let text = unwrap_inline_tags(&text);
    let text = remove_noise_blocks(&text);
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = remove_urls_and_emails(&text);
    let text = strip_source_attribution(&text);
    let text = normalize_characters(&text);
    let text = strip_trailing_cta(&text);
    let cleaned = finalize_display_text(&text);

    debug!(
        "cleaned html content: {} -> {} bytes",
        input.len(),
        cleaned.len()
    );
    cleaned
}

/// Clean a feed item title
///
/// Lighter than [`clean_html_content`]: tags are stripped without inline
/// extraction, and two title-only passes remove a leading `[Category]`
/// prefix and a trailing all-caps source suffix.
#[must_use]
pub fn clean_news_title(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let text = unwrap_cdata(input);
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = strip_source_attribution(&text);
    let text = normalize_characters(&text);
    let text = CATEGORY_PREFIX_REGEX.replace(&text, "");
    let text = CAPS_SUFFIX_REGEX.replace(&text, "");
    finalize_display_text(&text)
}

/// Clean text that may or may not contain markup
///
/// Input without any tag-shaped substring skips the tag passes entirely;
/// anything else goes through [`clean_html_content`].
#[must_use]
pub fn extract_clean_text(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    if TAG_REGEX.is_match(input) {
        return clean_html_content(input);
    }

    let text = decode_entities(input);
    let text = remove_urls_and_emails(&text);
    let text = normalize_characters(&text);
    finalize_display_text(&text)
}

/// Check whether cleaned text is substantial enough to display
#[must_use]
pub fn is_valid_cleaned_content(text: &str) -> bool {
    let total = text.chars().count();
    if total < MIN_VALID_LENGTH {
        return false;
    }

    let special = text
        .chars()
        .filter(|&c| !(c.is_alphanumeric() || c.is_whitespace() || BASIC_PUNCTUATION.contains(c)))
        .count();
    // special-character ratio above 0.3
    if special * 10 > total * 3 {
        return false;
    }

    let substantial = text
        .split_whitespace()
        .filter(|word| word.chars().count() > 2 && word.chars().any(char::is_alphabetic))
        .count();
    substantial >= MIN_SUBSTANTIAL_WORDS
}

fn unwrap_cdata(input: &str) -> String {
    CDATA_REGEX.replace_all(input, "$1").into_owned()
}

fn unwrap_inline_tags(input: &str) -> String {
    let text = ANCHOR_REGEX.replace_all(input, "$1");
    let text = BOLD_REGEX.replace_all(&text, "$1");
    let text = ITALIC_REGEX.replace_all(&text, "$1");
    // block-level tags keep a trailing space so words do not fuse
    let text = HEADING_REGEX.replace_all(&text, "$1 ");
    let text = PARAGRAPH_REGEX.replace_all(&text, "$1 ");
    let text = DIV_REGEX.replace_all(&text, "$1 ");
    SPAN_REGEX.replace_all(&text, "$1").into_owned()
}

fn remove_noise_blocks(input: &str) -> String {
    let text = FONT_REGEX.replace_all(input, "");
    let text = SCRIPT_REGEX.replace_all(&text, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    COMMENT_REGEX.replace_all(&text, "").into_owned()
}

fn remove_urls_and_emails(input: &str) -> String {
    let text = URL_REGEX.replace_all(input, "");
    EMAIL_REGEX.replace_all(&text, "").into_owned()
}

fn strip_source_attribution(input: &str) -> String {
    let text = DASH_SOURCE_REGEX.replace(input, "");
    let text = VIA_SOURCE_REGEX.replace(&text, "");
    let text = PIPE_SOURCE_REGEX.replace(&text, "");
    let text = BYLINE_REGEX.replace(&text, "");
    let text = ACCORDING_TO_REGEX.replace(&text, "");
    let text = REPORTS_REGEX.replace(&text, "");
    LEADING_DASH_REGEX.replace(&text, "").into_owned()
}

fn normalize_characters(input: &str) -> String {
    let mapped: String = input
        .chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => Some('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => Some('"'),
            '\u{2013}' | '\u{2014}' => Some('-'),
            '\u{200B}'..='\u{200D}' | '\u{FEFF}' => None,
            _ => Some(c),
        })
        .collect();

    WHITESPACE_REGEX.replace_all(&mapped, " ").trim().to_string()
}

fn strip_trailing_cta(input: &str) -> String {
    CTA_REGEX.replace(input, "").into_owned()
}

fn finalize_display_text(input: &str) -> String {
    let text = input.trim();
    if text.chars().count() < MIN_DISPLAY_LENGTH || !WORD_CHAR_REGEX.is_match(text) {
        return String::new();
    }

    // punctuation detached from the last word is debris, an attached
    // sentence-final period is not
    let text = LEADING_PUNCT_REGEX.replace(text, "");
    let text = STRAY_PUNCT_REGEX.replace(&text, "");
    truncate_display(text.trim(), MAX_DISPLAY_LENGTH)
}

/// Truncate to `limit` characters, preferring the last space when it falls
/// close enough to the cap
fn truncate_display(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut: String = text.chars().take(limit).collect();
    let earliest = limit.saturating_sub(BOUNDARY_WINDOW);
    match cut.rfind(' ') {
        Some(pos) if cut[..pos].chars().count() >= earliest => {
            format!("{}...", cut[..pos].trim_end())
        }
        _ => format!("{cut}..."),
    }
}
