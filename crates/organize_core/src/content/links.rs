//! Link-marker parsing over sub-block contents.
//!
//! # Responsibility
//! - Recognize `[title](url)` markers with an http/https url.
//! - Leave malformed markers as literal text.
//!
//! # Invariants
//! - The returned segments concatenate back to the input verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[\w./?=#]+)\)").expect("valid link regex"));

/// One display segment of a sub-block's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    /// Literal text, rendered as-is.
    Text(String),
    /// Recognized link marker.
    Link {
        /// Link caption.
        title: String,
        /// Target url, always `http://` or `https://`.
        url: String,
    },
}

/// Splits contents into text and link segments.
///
/// A marker is `[title](url)` where the url starts with `http://` or
/// `https://`; anything else stays literal text. Empty inputs produce an
/// empty segment list.
pub fn parse_link_markers(contents: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for caps in LINK_MARKER_RE.captures_iter(contents) {
        let (Some(whole), Some(title), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(ContentSegment::Text(
                contents[cursor..whole.start()].to_string(),
            ));
        }
        segments.push(ContentSegment::Link {
            title: title.as_str().to_string(),
            url: url.as_str().to_string(),
        });
        cursor = whole.end();
    }

    if cursor < contents.len() {
        segments.push(ContentSegment::Text(contents[cursor..].to_string()));
    }
    segments
}
