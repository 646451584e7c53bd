//! Draw session: the groups being edited for one tournament, kept in sync with its store.
//!
//! A session starts `Uninitialized` and becomes `Initialized` for a tournament the
//! first time it sees that tournament's id. Seeing the same id again does not
//! re-partition, so manual edits survive reloads of the record. A different id,
//! a changed strategy, a roster whose names no longer match the groups, or an
//! explicit [`DrawSession::regenerate`] starts a fresh draw.

use crate::logic::assemble::generate_teams;
use crate::logic::editor;
use crate::logic::partition::partition;
use crate::models::{
    DrawError, GroupRole, Groups, Player, ScoreKey, Strategy, Team, Tournament, TournamentId,
};
use crate::store::{PersistenceError, TournamentStore, TournamentUpdate};
use serde::Serialize;

/// What happened to the store after a draw operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawOutcome {
    /// Teams were derived and written.
    Persisted,
    /// Teams were derived but the write failed; in-memory state is kept for a retry.
    Stale(PersistenceError),
    /// Groups changed but teams cannot be formed yet (e.g. pick slots still empty).
    /// Nothing was written.
    Pending(DrawError),
    /// The tournament is completed; nothing changed and nothing was written.
    Locked,
}

/// Draw in progress for one tournament.
#[derive(Clone, Debug, Serialize)]
pub struct ActiveDraw {
    pub tournament_id: TournamentId,
    pub strategy: Strategy,
    pub score_key: ScoreKey,
    pub completed: bool,
    #[serde(skip)]
    roster: Vec<Player>,
    pub groups: Groups,
    /// Teams last derived (or loaded from the record at initialization).
    pub teams: Vec<Team>,
    /// Whether `teams` matches what the store holds.
    pub durable: bool,
}

#[derive(Clone, Debug, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized(ActiveDraw),
}

#[derive(Clone, Debug, Default)]
pub struct DrawSession {
    state: SessionState,
}

impl DrawSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveDraw> {
        match &self.state {
            SessionState::Initialized(active) => Some(active),
            SessionState::Uninitialized => None,
        }
    }

    pub fn tournament_id(&self) -> Option<TournamentId> {
        self.active().map(|a| a.tournament_id)
    }

    pub fn groups(&self) -> Option<&Groups> {
        self.active().map(|a| &a.groups)
    }

    pub fn teams(&self) -> Option<&[Team]> {
        self.active().map(|a| a.teams.as_slice())
    }

    fn active_mut(&mut self) -> Result<&mut ActiveDraw, DrawError> {
        match &mut self.state {
            SessionState::Initialized(active) => Ok(active),
            SessionState::Uninitialized => Err(DrawError::NotInitialized),
        }
    }

    /// Bind the session to `tournament`. Partitions the roster only when the
    /// tournament id differs from the one already initialized, its strategy
    /// changed, or players were added or removed since the groups were drawn;
    /// otherwise just refreshes the roster snapshot and completed flag.
    /// Returns true when a new draw was made.
    pub fn sync(&mut self, tournament: &Tournament) -> bool {
        if let SessionState::Initialized(active) = &mut self.state {
            if active.tournament_id == tournament.id {
                active.completed = tournament.completed;
                active.roster = tournament.players.clone();
                let same_strategy = active.strategy == tournament.strategy;
                let same_players = roster_matches(&active.groups, &tournament.players);
                if same_strategy && same_players {
                    return false;
                }
                if !same_strategy {
                    // Group shapes differ between strategies.
                    log::info!(
                        "Strategy for {} changed to {:?}; starting a new draw",
                        tournament.id,
                        tournament.strategy
                    );
                } else {
                    log::info!(
                        "Roster for {} changed ({} player(s)); starting a new draw",
                        tournament.id,
                        tournament.players.len()
                    );
                }
                active.strategy = tournament.strategy;
                active.groups = partition(&active.roster, active.strategy, active.score_key);
                return true;
            }
        }
        log::info!(
            "Initializing draw for tournament {} ({} player(s), {:?})",
            tournament.id,
            tournament.players.len(),
            tournament.strategy
        );
        let groups = partition(&tournament.players, tournament.strategy, tournament.score_key);
        self.state = SessionState::Initialized(ActiveDraw {
            tournament_id: tournament.id,
            strategy: tournament.strategy,
            score_key: tournament.score_key,
            completed: tournament.completed,
            roster: tournament.players.clone(),
            groups,
            teams: tournament.teams.clone(),
            durable: true,
        });
        true
    }

    /// Start the draw over with `key`, discarding manual edits, then derive and store teams.
    pub async fn regenerate<S: TournamentStore>(
        &mut self,
        key: ScoreKey,
        store: &S,
    ) -> Result<DrawOutcome, DrawError> {
        let active = self.active_mut()?;
        if active.completed {
            return Ok(DrawOutcome::Locked);
        }
        active.score_key = key;
        active.groups = partition(&active.roster, active.strategy, key);
        Ok(derive_and_persist(active, store).await)
    }

    /// Swap two slots, then derive and store teams.
    pub async fn swap<S: TournamentStore>(
        &mut self,
        from: GroupRole,
        from_index: usize,
        to: GroupRole,
        to_index: usize,
        store: &S,
    ) -> Result<DrawOutcome, DrawError> {
        let active = self.active_mut()?;
        if active.completed {
            return Ok(DrawOutcome::Locked);
        }
        editor::swap(&mut active.groups, from, from_index, to, to_index)?;
        Ok(derive_and_persist(active, store).await)
    }

    /// Shuffle one group, then derive and store teams.
    pub async fn shuffle<S: TournamentStore>(
        &mut self,
        role: GroupRole,
        store: &S,
    ) -> Result<DrawOutcome, DrawError> {
        let active = self.active_mut()?;
        if active.completed {
            return Ok(DrawOutcome::Locked);
        }
        editor::shuffle(&mut active.groups, role)?;
        Ok(derive_and_persist(active, store).await)
    }

    /// Form teams from the current groups and store them.
    /// Validation failures are returned as errors.
    pub async fn generate_teams<S: TournamentStore>(
        &mut self,
        store: &S,
    ) -> Result<DrawOutcome, DrawError> {
        let active = self.active_mut()?;
        if active.completed {
            return Ok(DrawOutcome::Locked);
        }
        active.teams = generate_teams(&active.groups, active.strategy)?;
        Ok(persist(active, store).await)
    }

    /// Re-send the last derived teams after a failed write.
    pub async fn retry_persist<S: TournamentStore>(
        &mut self,
        store: &S,
    ) -> Result<DrawOutcome, DrawError> {
        let active = self.active_mut()?;
        if active.completed {
            return Ok(DrawOutcome::Locked);
        }
        Ok(persist(active, store).await)
    }
}

/// Whether the groups hold exactly the roster's players (by name, each once).
fn roster_matches(groups: &Groups, players: &[Player]) -> bool {
    let mut placed: Vec<&str> = groups.all_players().map(|p| p.name.as_str()).collect();
    let mut roster: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    placed.sort_unstable();
    roster.sort_unstable();
    placed == roster
}

async fn derive_and_persist<S: TournamentStore>(
    active: &mut ActiveDraw,
    store: &S,
) -> DrawOutcome {
    match generate_teams(&active.groups, active.strategy) {
        Ok(teams) => {
            active.teams = teams;
            persist(active, store).await
        }
        Err(e) => {
            log::debug!("Teams not derived for {}: {}", active.tournament_id, e);
            DrawOutcome::Pending(e)
        }
    }
}

async fn persist<S: TournamentStore>(active: &mut ActiveDraw, store: &S) -> DrawOutcome {
    match store
        .update(active.tournament_id, TournamentUpdate::teams(active.teams.clone()))
        .await
    {
        Ok(_) => {
            active.durable = true;
            log::info!(
                "Saved {} team(s) for tournament {}",
                active.teams.len(),
                active.tournament_id
            );
            DrawOutcome::Persisted
        }
        Err(e) => {
            active.durable = false;
            log::warn!("Could not save teams for {}: {}", active.tournament_id, e);
            DrawOutcome::Stale(e)
        }
    }
}
