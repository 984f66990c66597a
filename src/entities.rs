//! HTML entity decoding

use regex::{Captures, Regex};

/// Named entities replaced literally, in order
///
/// `&amp;` comes first so double-encoded entities resolve through the rest
/// of the table.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    // typography
    ("&ndash;", "\u{2013}"),
    ("&mdash;", "\u{2014}"),
    ("&hellip;", "\u{2026}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&laquo;", "\u{AB}"),
    ("&raquo;", "\u{BB}"),
    ("&bull;", "\u{2022}"),
    ("&middot;", "\u{B7}"),
    ("&prime;", "\u{2032}"),
    ("&Prime;", "\u{2033}"),
    // legal and reference marks
    ("&copy;", "\u{A9}"),
    ("&reg;", "\u{AE}"),
    ("&trade;", "\u{2122}"),
    ("&sect;", "\u{A7}"),
    ("&para;", "\u{B6}"),
    ("&dagger;", "\u{2020}"),
    ("&Dagger;", "\u{2021}"),
    ("&permil;", "\u{2030}"),
    // currency
    ("&euro;", "\u{20AC}"),
    ("&pound;", "\u{A3}"),
    ("&yen;", "\u{A5}"),
    ("&cent;", "\u{A2}"),
    // math and fractions
    ("&times;", "\u{D7}"),
    ("&divide;", "\u{F7}"),
    ("&plusmn;", "\u{B1}"),
    ("&deg;", "\u{B0}"),
    ("&micro;", "\u{B5}"),
    ("&frac12;", "\u{BD}"),
    ("&frac14;", "\u{BC}"),
    ("&frac34;", "\u{BE}"),
    // arrows
    ("&larr;", "\u{2190}"),
    ("&uarr;", "\u{2191}"),
    ("&rarr;", "\u{2192}"),
    ("&darr;", "\u{2193}"),
    ("&harr;", "\u{2194}"),
    ("&szlig;", "\u{DF}"),
];

static DECIMAL_ENTITY_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"&#([0-9]+);").unwrap());

static HEX_ENTITY_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"&#[xX]([0-9a-fA-F]+);").unwrap());

static NAMED_SHAPE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"&[a-zA-Z][a-zA-Z0-9]*;").unwrap());

/// Decode HTML entities into plain text
///
/// Named entities from the fixed table are substituted first, then decimal
/// and hex numeric entities, and whatever still looks like `&name;` is
/// dropped so no raw entity ever reaches display text.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut text = input.to_string();
    for (entity, replacement) in NAMED_ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    let text = DECIMAL_ENTITY_REGEX.replace_all(&text, |caps: &Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .map_or_else(|_| String::new(), decode_codepoint)
    });
    let text = HEX_ENTITY_REGEX.replace_all(&text, |caps: &Captures<'_>| {
        u32::from_str_radix(&caps[1], 16).map_or_else(|_| String::new(), decode_codepoint)
    });

    NAMED_SHAPE_REGEX.replace_all(&text, "").into_owned()
}

/// Decode a numeric entity code point
///
/// Only printable ASCII (33-126) and extended Latin-1 (160-255) are emitted;
/// control characters and everything outside that range become empty.
fn decode_codepoint(code: u32) -> String {
    if (33..=126).contains(&code) || (160..=255).contains(&code) {
        char::from_u32(code).map_or_else(String::new, String::from)
    } else {
        String::new()
    }
}

/// Minimal decode for email display paths
pub(crate) fn decode_basic_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}
