//! Team roster: the named teams a game day is played between.

use serde::{Deserialize, Serialize};

/// A team slot in the roster: display name plus a color token for the UI.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Display color/gradient token consumed by the presentation layer.
    pub color: String,
}

impl Team {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The default four-team roster.
pub fn default_teams() -> Vec<Team> {
    vec![
        Team::new("Vermelho", "red"),
        Team::new("Azul", "blue"),
        Team::new("Brasil", "yellow"),
        Team::new("VerdeBranco", "green"),
    ]
}
