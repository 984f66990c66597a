//! MIME multipart detection and part extraction

use crate::cleaner::{SCRIPT_REGEX, STYLE_REGEX, TAG_REGEX};
use crate::entities::decode_basic_entities;
use crate::types::{EmailPart, ParsedEmail, PartKind, SourceFormat, TransferEncoding};
use regex::Regex;
use tracing::{debug, trace};

static BOUNDARY_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"--[A-Za-z0-9_=-]{10,}").unwrap());

static MULTIPART_TYPE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)content-type:\s*text/(?:plain|html)").unwrap());

pub(crate) static TRANSFER_ENCODING_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)content-transfer-encoding:").unwrap());

static BLANK_LINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

static PART_CONTENT_TYPE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)content-type:\s*([^;\r\n]+)").unwrap());

static PART_ENCODING_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)content-transfer-encoding:\s*([A-Za-z0-9-]+)").unwrap()
});

static LINE_BREAK_TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</h[1-6]>").unwrap());

static SPACE_RUN_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static SOFT_BREAK_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"=\r?\n").unwrap());

/// Check whether a message looks like a raw MIME multipart payload
///
/// Requires all three markers at once: a boundary-shaped token, a
/// `Content-Type: text/plain` or `text/html` header, and a
/// `Content-Transfer-Encoding` header. Plain chat text that merely
/// mentions one of the headers stays undetected.
#[must_use]
pub fn is_mime_multipart_message(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    BOUNDARY_REGEX.is_match(text)
        && MULTIPART_TYPE_REGEX.is_match(text)
        && TRANSFER_ENCODING_REGEX.is_match(text)
}

/// Parse a raw MIME multipart message into its display-relevant parts
///
/// Undetected input passes through unchanged with no multipart flags set.
/// Detected input is split on the first boundary-shaped token; parts are
/// pulled out by a direct header pattern first and by boundary splitting
/// when that finds nothing. `clean_text` prefers the plain part verbatim,
/// then the HTML part stripped of markup, then the raw input.
#[must_use]
pub fn parse_mime_multipart_message(text: &str) -> ParsedEmail {
    if !is_mime_multipart_message(text) {
        return ParsedEmail::passthrough(text);
    }
    let Some(delimiter) = BOUNDARY_REGEX.find(text).map(|m| m.as_str().to_string()) else {
        return ParsedEmail::passthrough(text);
    };

    let mut plain_part = extract_part_directly(text, &delimiter, PartKind::Plain);
    let mut html_part = extract_part_directly(text, &delimiter, PartKind::Html);

    if plain_part.is_none() && html_part.is_none() {
        trace!("direct header match found nothing, splitting on boundary");
        let (plain, html) = extract_parts_by_split(text, &delimiter);
        plain_part = plain;
        html_part = html;
    }

    let clean_text = derive_clean_text(text, plain_part.as_ref(), html_part.as_ref());
    debug!(
        "parsed multipart message: plain={} html={}",
        plain_part.is_some(),
        html_part.is_some()
    );

    ParsedEmail {
        has_multipart: true,
        text_plain: plain_part.map(|part| part.content),
        text_html: html_part.map(|part| part.content),
        clean_text,
        original_format: Some(SourceFormat::MimeMultipart),
    }
}

/// Decode quoted-printable text, tolerating malformed escapes
///
/// Soft line breaks (`=` at end of line) are removed, `=XX` escapes are
/// decoded at the byte level before UTF-8 interpretation so multi-byte
/// sequences survive, and invalid escapes pass through literally.
fn decode_quoted_printable(input: &str) -> String {
    let unfolded = SOFT_BREAK_REGEX.replace_all(input, "");
    let bytes = unfolded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'='
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2]))
        {
            out.push(hi * 16 + lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).replace("\r\n", "\n")
}

/// Match a part by its full header pattern: content type with a utf-8
/// charset, an optional transfer-encoding header, then the body up to the
/// next boundary occurrence
fn extract_part_directly(text: &str, delimiter: &str, kind: PartKind) -> Option<EmailPart> {
    let pattern = format!(
        r#"(?is)content-type:\s*{};?\s*charset="?utf-8"?;?\s*(?:content-transfer-encoding:\s*([a-z0-9-]+);?\s*)?(.*?)\s*{}"#,
        regex::escape(kind.as_mime()),
        regex::escape(delimiter)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;

    let encoding = caps.get(1).map(|m| TransferEncoding::parse(m.as_str()));
    let body = caps.get(2).map_or("", |m| m.as_str());
    let content = decode_part_body(body, encoding.as_ref());
    if content.is_empty() {
        return None;
    }
    Some(EmailPart {
        kind,
        content,
        encoding,
    })
}

/// Split on the boundary and parse each segment's headers, accepting any
/// charset; when one content type appears in several segments the last
/// one wins
fn extract_parts_by_split(text: &str, delimiter: &str) -> (Option<EmailPart>, Option<EmailPart>) {
    let mut plain = None;
    let mut html = None;

    for segment in text.split(delimiter) {
        let segment = segment.trim();
        if segment.is_empty() || segment == "--" {
            continue;
        }
        let Some(split) = BLANK_LINE_REGEX.find(segment) else {
            continue;
        };
        let headers = &segment[..split.start()];
        let body = &segment[split.end()..];

        let Some(kind) = PART_CONTENT_TYPE_REGEX
            .captures(headers)
            .and_then(|caps| PartKind::from_mime(caps[1].trim()))
        else {
            continue;
        };
        let encoding = PART_ENCODING_REGEX
            .captures(headers)
            .map(|caps| TransferEncoding::parse(&caps[1]));
        let content = decode_part_body(body, encoding.as_ref());
        if content.is_empty() {
            continue;
        }

        let part = EmailPart {
            kind,
            content,
            encoding,
        };
        match kind {
            PartKind::Plain => plain = Some(part),
            PartKind::Html => html = Some(part),
        }
    }

    (plain, html)
}

fn decode_part_body(raw: &str, encoding: Option<&TransferEncoding>) -> String {
    let decoded = if encoding.is_some_and(TransferEncoding::is_quoted_printable) {
        decode_quoted_printable(raw)
    } else {
        raw.replace("\r\n", "\n")
    };
    decoded.trim().to_string()
}

fn derive_clean_text(raw: &str, plain: Option<&EmailPart>, html: Option<&EmailPart>) -> String {
    match (plain, html) {
        (Some(part), _) => part.content.clone(),
        (None, Some(part)) => strip_html_for_display(&part.content),
        (None, None) => raw.to_string(),
    }
}

/// Reduce an HTML part to readable text, keeping line structure
fn strip_html_for_display(html: &str) -> String {
    let text = html.replace("\r\n", "\n");
    let text = SCRIPT_REGEX.replace_all(&text, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    let text = LINE_BREAK_TAG_REGEX.replace_all(&text, "\n");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_basic_entities(&text);
    let text = SPACE_RUN_REGEX.replace_all(&text, " ");

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    lines.join("\n").trim().to_string()
}

const fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
