//! Best-effort parser for pasted sign-up messages.
//!
//! The input convention is a Chinese group-chat roll call: a header line with
//! date/time/location and one numbered line per player. Every extraction is
//! independent and total; unrecognized fields come back empty and an empty
//! player list is a valid result the caller must handle.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::formations::{SquadFormat, assign_positions};

/// Paste buffers are clipped before parsing, matching the input limit of the
/// mobile client this replaces.
pub const MAX_INPUT_CHARS: usize = 2000;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})点").unwrap());
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"地点[：:]([^\n]*)").unwrap());
// Ordinal marker (digits + '.' or ideographic comma) followed by a candidate
// name. Digits are excluded from the capture so successive numbered lines
// cannot bleed into one match.
static PLAYER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+[.、]\s*([^\n\d]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlayer {
    pub name: String,
    pub position: String,
}

/// Transient parse result; empty strings mean "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRoster {
    pub date: String,
    pub time: String,
    pub location: String,
    pub players: Vec<ParsedPlayer>,
}

impl ParsedRoster {
    pub fn has_players(&self) -> bool {
        !self.players.is_empty()
    }
}

pub fn parse_roster(text: &str, format: SquadFormat) -> ParsedRoster {
    let clipped = clip(text);
    let text = clipped.as_ref();

    let date = DATE_RE
        .captures(text)
        .map(|cap| format!("{}-{:0>2}-{:0>2}", &cap[1], &cap[2], &cap[3]))
        .unwrap_or_default();

    let time = TIME_RE
        .captures(text)
        .map(|cap| format!("{:0>2}:00", &cap[1]))
        .unwrap_or_default();

    let location = LOCATION_RE
        .captures(text)
        .map(|cap| cap[1].trim().to_string())
        .unwrap_or_default();

    let names: Vec<String> = PLAYER_RE
        .captures_iter(text)
        .filter_map(|cap| extract_name(&cap[1]))
        .collect();

    let positions = assign_positions(names.len(), format);
    let players = names
        .into_iter()
        .zip(positions)
        .map(|(name, position)| ParsedPlayer {
            name,
            position: position.to_string(),
        })
        .collect();

    ParsedRoster {
        date,
        time,
        location,
        players,
    }
}

fn clip(text: &str) -> std::borrow::Cow<'_, str> {
    if text.chars().count() <= MAX_INPUT_CHARS {
        std::borrow::Cow::Borrowed(text)
    } else {
        std::borrow::Cow::Owned(text.chars().take(MAX_INPUT_CHARS).collect())
    }
}

/// A name runs up to the first whitespace or opening parenthesis (ASCII or
/// full-width); a plausible name is 1..=9 characters, which guards against
/// capturing a whole sentence.
fn extract_name(raw: &str) -> Option<String> {
    let head = raw
        .trim()
        .split(|c: char| c.is_whitespace() || c == '(' || c == '（')
        .next()
        .unwrap_or("")
        .trim();
    let len = head.chars().count();
    if (1..=9).contains(&len) {
        Some(head.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_stops_at_parenthesis() {
        assert_eq!(extract_name("李四 (GK)"), Some("李四".to_string()));
        assert_eq!(extract_name("王五（守门）"), Some("王五".to_string()));
    }

    #[test]
    fn long_candidates_are_rejected() {
        assert_eq!(extract_name("这是一整行完全不像名字的内容啊"), None);
        assert_eq!(extract_name("   "), None);
    }
}
