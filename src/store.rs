//! Persistence seam for tournament records.

use crate::models::{Player, Team, Tournament, TournamentId};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::RwLock;

/// The backing store rejected or could not complete a write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PersistenceError {
    NotFound(TournamentId),
    /// The store refused the write (e.g. the record is completed).
    Rejected(String),
    /// The store could not be reached or timed out.
    Unavailable(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::NotFound(id) => write!(f, "Tournament {} not found", id),
            PersistenceError::Rejected(msg) => write!(f, "Write rejected: {}", msg),
            PersistenceError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Partial update of a tournament record. `None` fields are left as stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TournamentUpdate {
    pub players: Option<Vec<Player>>,
    pub teams: Option<Vec<Team>>,
}

impl TournamentUpdate {
    pub fn teams(teams: Vec<Team>) -> Self {
        Self {
            teams: Some(teams),
            ..Self::default()
        }
    }
}

/// Async read-modify-write access to tournament records.
///
/// `update` is all-or-nothing: either every field in the update is stored and
/// the new record returned, or nothing changes.
pub trait TournamentStore: Send + Sync {
    fn load(&self, id: TournamentId)
        -> impl Future<Output = Result<Tournament, PersistenceError>> + Send;

    fn save(&self, tournament: Tournament)
        -> impl Future<Output = Result<Tournament, PersistenceError>> + Send;

    fn update(
        &self,
        id: TournamentId,
        update: TournamentUpdate,
    ) -> impl Future<Output = Result<Tournament, PersistenceError>> + Send;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<TournamentId, Tournament>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop records matching `pred`; returns how many were removed.
    pub async fn remove_where<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(&Tournament) -> bool,
    {
        let mut g = self.records.write().await;
        let before = g.len();
        g.retain(|_, t| !pred(t));
        before - g.len()
    }
}

impl TournamentStore for InMemoryStore {
    async fn load(&self, id: TournamentId) -> Result<Tournament, PersistenceError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::NotFound(id))
    }

    async fn save(&self, mut tournament: Tournament) -> Result<Tournament, PersistenceError> {
        tournament.touch();
        self.records
            .write()
            .await
            .insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    async fn update(
        &self,
        id: TournamentId,
        update: TournamentUpdate,
    ) -> Result<Tournament, PersistenceError> {
        let mut g = self.records.write().await;
        let record = g.get_mut(&id).ok_or(PersistenceError::NotFound(id))?;
        if record.completed {
            return Err(PersistenceError::Rejected("tournament is completed".to_string()));
        }
        if let Some(players) = update.players {
            record.players = players;
        }
        if let Some(teams) = update.teams {
            record.teams = teams;
        }
        record.touch();
        Ok(record.clone())
    }
}
