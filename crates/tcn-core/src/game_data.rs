use serde::{Deserialize, Serialize};

use crate::game::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// A converted game in both notations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub tags: Vec<Tag>,
    pub moves: Vec<String>, // SAN notation
    pub movetext: String,
    pub tcn: String,
    pub final_fen: String,
    pub outcome: Option<Outcome>,
}
