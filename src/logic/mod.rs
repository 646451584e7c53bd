//! Draw and payout logic: partition, manual edits, team assembly, payouts, sessions.

mod assemble;
mod editor;
mod partition;
mod payout;
mod roster;
mod session;

pub use assemble::{assemble, generate_teams};
pub use editor::{shuffle, shuffle_with_rng, swap};
pub use partition::{
    partition, partition_with_rng, sort_by_score, DrawOrder, DrawPolicy, Seeding, Split,
};
pub use payout::{
    calculate_payouts, spot_weights, tournament_payouts, PayoutSchedule, GOLDEN_RATIO,
    PLATEAU_START, ROUNDING_UNIT,
};
pub use roster::import_csv;
pub use session::{ActiveDraw, DrawOutcome, DrawSession, SessionState};
