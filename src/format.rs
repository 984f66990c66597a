//! Chat-facing formatting built on the MIME parser

use crate::cleaner::{BOLD_REGEX, ITALIC_REGEX, TAG_REGEX};
use crate::entities::decode_basic_entities;
use crate::mime::{TRANSFER_ENCODING_REGEX, is_mime_multipart_message, parse_mime_multipart_message};
use crate::types::OutputFormat;
use regex::Regex;

/// Default character budget for [`email_summary`]
pub const DEFAULT_SUMMARY_LENGTH: usize = 150;

static HEADER_LINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*:").unwrap());

static CONTENT_TYPE_HEADER_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)content-type:\s*text/").unwrap());

static SUBJECT_HEADER_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?im)^subject:").unwrap());

static ADDRESS_HEADER_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?im)^(?:from|to):.*@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap()
});

static HTML_DOCUMENT_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<html[^>]*>.*</html>").unwrap());

static DOCTYPE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<!doctype[^>]*>").unwrap());

static HEAD_BLOCK_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<head[^>]*>.*?</head>").unwrap());

static HTML_SHELL_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)</?html[^>]*>").unwrap());

static BODY_TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)</?body[^>]*>").unwrap());

static MD_LINK_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#).unwrap()
});

static BREAK_TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static DIV_OPEN_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<div\b[^>]*>").unwrap());

static PARA_TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)</?p\b[^>]*>").unwrap());

static EXCESS_NEWLINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Format a possibly raw email message for chat display
///
/// MIME multipart input is parsed; `OutputFormat::Original` renders the
/// HTML part as markdown when one exists, `OutputFormat::Clean` (and any
/// fallback) uses the parser's clean text. Non-MIME input that still
/// looks like an email loses its leading header block. Anything else is
/// returned unchanged.
#[must_use]
pub fn format_email_for_chat(text: &str, prefer: OutputFormat) -> String {
    if is_mime_multipart_message(text) {
        let parsed = parse_mime_multipart_message(text);
        if prefer == OutputFormat::Original
            && let Some(html) = &parsed.text_html
        {
            return html_to_markdown(html);
        }
        return parsed.clean_text;
    }
    if is_email_like_message(text) {
        return strip_header_block(text);
    }
    text.to_string()
}

/// Check whether a message carries email markers without being a full
/// multipart payload
#[must_use]
pub fn is_email_like_message(text: &str) -> bool {
    is_mime_multipart_message(text)
        || CONTENT_TYPE_HEADER_REGEX.is_match(text)
        || TRANSFER_ENCODING_REGEX.is_match(text)
        || SUBJECT_HEADER_REGEX.is_match(text)
        || ADDRESS_HEADER_REGEX.is_match(text)
        || HTML_DOCUMENT_REGEX.is_match(text)
}

/// Produce a short preview of a message, ending at a sentence or word
/// boundary when one falls within the last 30% of the budget
#[must_use]
pub fn email_summary(text: &str, max_length: usize) -> String {
    let content = parse_mime_multipart_message(text).clean_text;
    if content.chars().count() <= max_length {
        return content;
    }

    let cut: String = content.chars().take(max_length).collect();
    let threshold = max_length * 7 / 10;
    if let Some(pos) = cut.rfind('.')
        && cut[..pos].chars().count() >= threshold
    {
        return cut[..=pos].to_string();
    }
    if let Some(pos) = cut.rfind(' ')
        && cut[..pos].chars().count() >= threshold
    {
        return format!("{}...", cut[..pos].trim_end());
    }
    format!("{cut}...")
}

/// Drop the leading run of `Name: value` header lines; the body starts at
/// the first blank or non-header line
fn strip_header_block(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut start = lines.len();
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            start = idx + 1;
            break;
        }
        if !HEADER_LINE_REGEX.is_match(line) {
            start = idx;
            break;
        }
    }
    lines[start..].join("\n").trim().to_string()
}

/// Convert an HTML email body to markdown-flavored text
fn html_to_markdown(html: &str) -> String {
    let text = DOCTYPE_REGEX.replace_all(html, "");
    let text = HEAD_BLOCK_REGEX.replace_all(&text, "");
    let text = HTML_SHELL_REGEX.replace_all(&text, "");
    let text = BODY_TAG_REGEX.replace_all(&text, "");
    let text = BOLD_REGEX.replace_all(&text, "**${1}**");
    let text = ITALIC_REGEX.replace_all(&text, "*${1}*");
    let text = MD_LINK_REGEX.replace_all(&text, "[${2}](${1})");
    let text = BREAK_TAG_REGEX.replace_all(&text, "\n");
    let text = DIV_OPEN_REGEX.replace_all(&text, "\n");
    let text = PARA_TAG_REGEX.replace_all(&text, "\n");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_basic_entities(&text);
    let text = EXCESS_NEWLINE_REGEX.replace_all(&text, "\n\n");
    text.trim().to_string()
}
