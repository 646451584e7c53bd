//! Player ratings and the composite score used to rank a roster.

use serde::{Deserialize, Serialize};

/// Which rating a draw sorts the roster by.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKey {
    /// `ppd + mpr * 10`.
    #[default]
    Combo,
    Ppd,
    Mpr,
}

/// A rated player on a tournament roster. The name is the player's identity within a roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Points per dart (x01 games).
    pub ppd: f64,
    /// Marks per round (cricket).
    pub mpr: f64,
    #[serde(default)]
    pub paid: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, ppd: f64, mpr: f64) -> Self {
        Self {
            name: name.into(),
            ppd,
            mpr,
            paid: false,
        }
    }

    /// Composite rating across game types.
    pub fn combo(&self) -> f64 {
        self.ppd + self.mpr * 10.0
    }

    /// Rating used for ordering under the given key.
    pub fn score(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Combo => self.combo(),
            ScoreKey::Ppd => self.ppd,
            ScoreKey::Mpr => self.mpr,
        }
    }

    /// First space-delimited token of the full name (used for team names).
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn mark_paid(&mut self, paid: bool) {
        self.paid = paid;
    }
}
