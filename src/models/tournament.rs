//! Tournament record: roster, last drawn teams, fees and the completed flag.

use crate::models::money::{FeeSettings, Money};
use crate::models::player::{Player, ScoreKey};
use crate::models::strategy::Strategy;
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors from roster and settings changes. Nothing is modified when one is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Manual entry is missing a name or has a non-positive rating.
    InvalidPlayer(String),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    PlayerNotFound(String),
    InvalidSettings(String),
    /// Tournament is completed; roster and teams are read-only.
    Completed,
    /// CSV roster could not be read.
    RosterImport(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidPlayer(msg) => write!(f, "Invalid player: {}", msg),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            TournamentError::PlayerNotFound(name) => write!(f, "Player not found: {}", name),
            TournamentError::InvalidSettings(msg) => write!(f, "Invalid settings: {}", msg),
            TournamentError::Completed => write!(f, "Tournament is completed"),
            TournamentError::RosterImport(msg) => write!(f, "Could not import roster: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Default number of paid places.
pub const DEFAULT_PAYOUT_SPOTS: u32 = 3;

/// Full tournament record as stored by the persistence layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub players: Vec<Player>,
    /// Teams from the most recent draw.
    pub teams: Vec<Team>,
    pub strategy: Strategy,
    pub score_key: ScoreKey,
    pub fees: FeeSettings,
    pub payout_spots: u32,
    /// Once set, the roster and teams are read-only.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            teams: Vec::new(),
            strategy: Strategy::default(),
            score_key: ScoreKey::default(),
            fees: FeeSettings::default(),
            payout_spots: DEFAULT_PAYOUT_SPOTS,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a tournament with an initial roster (e.g. from an import).
    pub fn with_players(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new(name)
        }
    }

    fn ensure_open(&self) -> Result<(), TournamentError> {
        if self.completed {
            return Err(TournamentError::Completed);
        }
        Ok(())
    }

    /// Add a manually entered player. Names must be unique (case-insensitive)
    /// and ratings must be positive.
    pub fn add_player(&mut self, player: Player) -> Result<(), TournamentError> {
        self.ensure_open()?;
        let player = validate_player(player)?;
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&player.name));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        self.players.push(player);
        self.touch();
        Ok(())
    }

    /// Add several players at once; either all are added or none.
    pub fn add_players(&mut self, players: Vec<Player>) -> Result<(), TournamentError> {
        self.ensure_open()?;
        let mut staged = self.clone();
        for p in players {
            staged.add_player(p)?;
        }
        self.players = staged.players;
        self.touch();
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> Result<(), TournamentError> {
        self.ensure_open()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        self.players.remove(idx);
        self.touch();
        Ok(())
    }

    pub fn set_paid(&mut self, name: &str, paid: bool) -> Result<(), TournamentError> {
        self.ensure_open()?;
        self.players
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?
            .mark_paid(paid);
        self.touch();
        Ok(())
    }

    /// Replace fee and payout settings.
    pub fn update_settings(
        &mut self,
        fees: FeeSettings,
        payout_spots: u32,
        strategy: Strategy,
    ) -> Result<(), TournamentError> {
        self.ensure_open()?;
        if payout_spots == 0 {
            return Err(TournamentError::InvalidSettings(
                "payout spots must be at least 1".to_string(),
            ));
        }
        let fields = [
            ("entry_fee", fees.entry_fee),
            ("bar_contribution", fees.bar_contribution),
            ("usage_fee", fees.usage_fee),
            ("bonus_money", fees.bonus_money),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, m)| m.is_negative()) {
            return Err(TournamentError::InvalidSettings(format!(
                "{} must not be negative",
                field
            )));
        }
        self.fees = fees;
        self.payout_spots = payout_spots;
        self.strategy = strategy;
        self.touch();
        Ok(())
    }

    /// Mark the tournament completed. Idempotent.
    pub fn complete(&mut self) {
        if !self.completed {
            self.completed = true;
            self.touch();
        }
    }

    pub fn paid_count(&self) -> usize {
        self.players.iter().filter(|p| p.paid).count()
    }

    /// Total prize pool for the current roster.
    pub fn prize_pool(&self) -> Money {
        self.fees.prize_pool(self.players.len())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Check a manual entry: trimmed non-empty name, finite positive ratings.
pub fn validate_player(mut player: Player) -> Result<Player, TournamentError> {
    let name = player.name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidPlayer("name is required".to_string()));
    }
    player.name = name.to_string();
    if !player.ppd.is_finite() || player.ppd <= 0.0 {
        return Err(TournamentError::InvalidPlayer(format!(
            "{}: ppd must be a positive number",
            player.name
        )));
    }
    if !player.mpr.is_finite() || player.mpr <= 0.0 {
        return Err(TournamentError::InvalidPlayer(format!(
            "{}: mpr must be a positive number",
            player.name
        )));
    }
    Ok(player)
}
