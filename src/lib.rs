//! Dart league draw engine: library with models, draw/payout logic and the store seam.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    assemble, calculate_payouts, generate_teams, import_csv, partition, partition_with_rng,
    shuffle, shuffle_with_rng, sort_by_score, swap, tournament_payouts, ActiveDraw, DrawOutcome,
    DrawSession, PayoutSchedule, SessionState,
};
pub use models::{
    DrawError, FeeSettings, Group, GroupRole, Groups, Money, Player, ScoreKey, Strategy, Team,
    Tournament, TournamentError, TournamentId,
};
pub use store::{InMemoryStore, PersistenceError, TournamentStore, TournamentUpdate};
