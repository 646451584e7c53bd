//! Teams derived from a draw.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// A drawn team: 1 to 3 players, named after the members' first names.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// e.g. "Ann and Bob".
    pub name: String,
    /// Full player names in group order (A before B before C).
    pub players: Vec<String>,
}

impl Team {
    pub fn from_members(members: &[&Player]) -> Self {
        let name = members
            .iter()
            .map(|p| p.first_name())
            .collect::<Vec<_>>()
            .join(" and ");
        Self {
            name,
            players: members.iter().map(|p| p.name.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
