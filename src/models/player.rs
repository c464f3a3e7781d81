//! Player data structures and bulk registration parsing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in goal events and lookups).
pub type PlayerId = Uuid;

/// A registered player on a game day.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Optional photo reference (URL or storage key), set by the client.
    pub photo: Option<String>,
    /// Team the player is currently assigned to, if any.
    pub team: Option<String>,
}

impl Player {
    /// Create a new player with the given name, no photo, no team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            photo: None,
            team: None,
        }
    }
}

/// Parse a pasted registration list into player names.
///
/// One name per line. Leading list numbering ("1.", "2 -", "3)") is stripped,
/// whitespace trimmed, empty lines and duplicate names (case-insensitive) skipped.
pub fn parse_player_list(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in text.lines() {
        let name = strip_list_numbering(line.trim());
        if name.is_empty() {
            continue;
        }
        if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// Strip a leading "N.", "N)", "N -" style numbering from a line.
/// Lines where the digits are not followed by a separator (e.g. a name like
/// "2Pac") are returned unchanged.
fn strip_list_numbering(line: &str) -> &str {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits == line.len() {
        return line;
    }
    let rest = line[digits..].trim_start();
    let mut chars = rest.chars();
    match chars.next() {
        Some('.') | Some(')') | Some('-') => chars.as_str().trim_start(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_list() {
        let names = parse_player_list("1. Rafa\n2) Tiago\n3 - Pedro\n\nMarcos\n2. rafa");
        assert_eq!(names, vec!["Rafa", "Tiago", "Pedro", "Marcos"]);
    }

    #[test]
    fn keeps_names_starting_with_digits() {
        let names = parse_player_list("2Pac");
        assert_eq!(names, vec!["2Pac"]);
    }
}
