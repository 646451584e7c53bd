//! Data structures for the draw: players, groups, teams, money and the tournament record.

mod group;
mod money;
mod player;
mod strategy;
mod team;
mod tournament;

pub use group::{DrawError, Group, GroupRole, Groups};
pub use money::{FeeSettings, Money};
pub use player::{Player, ScoreKey};
pub use strategy::Strategy;
pub use team::Team;
pub use tournament::{
    validate_player, Tournament, TournamentError, TournamentId, DEFAULT_PAYOUT_SPOTS,
};
