//! Timed-text (caption XML) parsing
//!
//! YouTube serves captions as a flat list of `<text start=".." dur="..">`
//! elements. Cue text is entity-escaped twice (XML, then HTML) and may carry
//! inline markup such as `<font>` which is dropped.

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

use crate::types::TranscriptFragment;

fn text_element_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)"#).expect("valid text element pattern")
    })
}

fn attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\b([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*"([^"]*)""#).expect("valid attribute pattern")
    })
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity pattern")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

/// Parse a timed-text document into fragments, skipping empty cues
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptFragment> {
    let fragments: Vec<TranscriptFragment> = text_element_re()
        .captures_iter(xml)
        .filter_map(|caps| {
            let raw = caps.get(2)?.as_str();
            if raw.is_empty() {
                return None;
            }

            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let start = attribute(attrs, "start").unwrap_or(0.0);
            let duration = attribute(attrs, "dur").unwrap_or(0.0);

            let text = strip_tags(&decode_entities(&decode_entities(raw)));
            Some(TranscriptFragment::new(text, start, duration))
        })
        .collect();

    debug!("Parsed {} caption fragments", fragments.len());
    fragments
}

fn attribute(attrs: &str, name: &str) -> Option<f64> {
    attribute_re()
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps[2].trim().parse().ok())
}

/// Decode one level of XML/HTML character references
///
/// Unknown named entities are left untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    entity_re()
        .replace_all(input, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Drop inline markup tags
pub fn strip_tags(input: &str) -> String {
    tag_re().replace_all(input, "").into_owned()
}
