//! Core types for parsed messages

use crate::error::ParseFormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content type of a decoded MIME body part
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PartKind {
    /// A `text/plain` part
    #[serde(rename = "text/plain")]
    Plain,

    /// A `text/html` part
    #[serde(rename = "text/html")]
    Html,
}

impl PartKind {
    /// Map a MIME type token to a part kind
    ///
    /// Non-text types yield `None` and are skipped during extraction.
    #[must_use]
    pub fn from_mime(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text/plain" => Some(Self::Plain),
            "text/html" => Some(Self::Html),
            _ => None,
        }
    }

    /// Canonical MIME type string
    #[must_use]
    pub const fn as_mime(self) -> &'static str {
        match self {
            Self::Plain => "text/plain",
            Self::Html => "text/html",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

/// Content-Transfer-Encoding declared on a MIME body part
///
/// Only quoted-printable bodies are ever decoded; bodies in every other
/// encoding are stored as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransferEncoding {
    SevenBit,
    EightBit,
    Base64,
    QuotedPrintable,
    Other(String),
}

impl TransferEncoding {
    /// Parse an encoding token; unknown tokens are preserved verbatim
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "7bit" => Self::SevenBit,
            "8bit" => Self::EightBit,
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_quoted_printable(&self) -> bool {
        matches!(self, Self::QuotedPrintable)
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Base64 => write!(f, "base64"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
            Self::Other(token) => write!(f, "{token}"),
        }
    }
}

/// One decoded MIME body part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailPart {
    /// Part content type
    pub kind: PartKind,

    /// Decoded body content
    pub content: String,

    /// Transfer encoding from the part headers (if declared)
    pub encoding: Option<TransferEncoding>,
}

/// Structural format a message was recognized as before extraction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceFormat {
    /// MIME multipart with boundary-delimited body parts
    #[serde(rename = "mime-multipart")]
    MimeMultipart,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MimeMultipart => write!(f, "mime-multipart"),
        }
    }
}

/// Result of parsing a raw message body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedEmail {
    /// Whether MIME multipart structure was detected
    pub has_multipart: bool,

    /// Extracted plain-text part (only populated for multipart messages)
    pub text_plain: Option<String>,

    /// Extracted HTML part (only populated for multipart messages)
    pub text_html: Option<String>,

    /// Best displayable text: the plain part verbatim, a stripped rendering
    /// of the HTML part, or the raw input
    pub clean_text: String,

    /// Detected source format (if any)
    pub original_format: Option<SourceFormat>,
}

impl ParsedEmail {
    /// Wrap input that carries no multipart structure
    #[must_use]
    pub fn passthrough(text: &str) -> Self {
        Self {
            has_multipart: false,
            text_plain: None,
            text_html: None,
            clean_text: text.to_string(),
            original_format: None,
        }
    }
}

/// Preferred rendering for chat display
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Keep the sender's formatting, rendering HTML parts as Markdown
    Original,

    /// Plain readable text with markup stripped
    #[default]
    Clean,
}

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "clean" => Ok(Self::Clean),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Clean => write!(f, "clean"),
        }
    }
}
