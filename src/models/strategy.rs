//! Named draw strategies.

use serde::{Deserialize, Serialize};

/// How a roster is split into groups and paired into teams.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Top half vs bottom half, paired in order.
    #[default]
    AbDraw,
    /// Random order, then split like `AbDraw`.
    BlindDraw,
    /// Top half in order vs bottom half weakest-first.
    ParityDraw,
    /// Partners signed up together: alternate roster entries.
    PartnerBring,
    /// Bottom half seeded into B; the top half is picked into A by hand.
    LowPlayerPick,
    /// Top half seeded into A; the bottom half is picked into B by hand.
    HighPlayerPick,
    /// Three tiers A/B/C forming trios.
    AbcTrios,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::AbDraw,
        Strategy::BlindDraw,
        Strategy::ParityDraw,
        Strategy::PartnerBring,
        Strategy::LowPlayerPick,
        Strategy::HighPlayerPick,
        Strategy::AbcTrios,
    ];
}
