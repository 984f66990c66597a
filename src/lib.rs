// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::redundant_pub_crate)]

//! Text Scrub
//!
//! A text-cleaning library that turns HTML fragments, feed snippets and
//! raw MIME email payloads into plain text fit for chat display.
//!
//! # Features
//!
//! - Multi-pass HTML cleaning for feed content and titles
//! - MIME multipart detection and part extraction
//! - Quoted-printable decoding tolerant of malformed escapes
//! - HTML entity decoding beyond the basic named set
//! - Chat-oriented email formatting with a markdown option
//!
//! # Example
//!
//! ```rust
//! use text_scrub::{clean_html_content, is_valid_cleaned_content};
//!
//! let cleaned = clean_html_content("<p>Breaking: <b>markets</b> rally &amp; rebound</p>");
//! assert_eq!(cleaned, "Breaking: markets rally & rebound");
//! assert!(is_valid_cleaned_content(&cleaned));
//! ```

mod cleaner;
mod entities;
mod error;
mod format;
mod mime;
mod types;

pub use cleaner::{
    clean_html_content, clean_news_title, extract_clean_text, is_valid_cleaned_content,
};
pub use error::ParseFormatError;
pub use format::{
    DEFAULT_SUMMARY_LENGTH, email_summary, format_email_for_chat, is_email_like_message,
};
pub use mime::{is_mime_multipart_message, parse_mime_multipart_message};
pub use types::*;
