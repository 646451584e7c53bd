//! Ordered groups produced by a draw and edited before teams are formed.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Role of a group within a draw.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    A,
    B,
    C,
    Player1,
    Player2,
    /// Players waiting to be picked into an empty slot (pick draws only).
    Available,
}

impl GroupRole {
    /// Whether members of this group end up on teams.
    pub fn forms_teams(self) -> bool {
        self != GroupRole::Available
    }
}

impl std::fmt::Display for GroupRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupRole::A => "A",
            GroupRole::B => "B",
            GroupRole::C => "C",
            GroupRole::Player1 => "player1",
            GroupRole::Player2 => "player2",
            GroupRole::Available => "available",
        };
        f.write_str(s)
    }
}

/// One ordered group. A slot is `None` when it is an empty placeholder waiting for a pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub role: GroupRole,
    pub slots: Vec<Option<Player>>,
}

impl Group {
    pub fn new(role: GroupRole, players: Vec<Player>) -> Self {
        Self {
            role,
            slots: players.into_iter().map(Some).collect(),
        }
    }

    /// A group of `len` empty placeholders.
    pub fn empty_slots(role: GroupRole, len: usize) -> Self {
        Self {
            role,
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots, in order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().flatten()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// The full set of groups for one draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Groups {
    pub groups: Vec<Group>,
}

impl Groups {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn get(&self, role: GroupRole) -> Option<&Group> {
        self.groups.iter().find(|g| g.role == role)
    }

    pub fn get_mut(&mut self, role: GroupRole) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.role == role)
    }

    pub fn position(&self, role: GroupRole) -> Option<usize> {
        self.groups.iter().position(|g| g.role == role)
    }

    /// Groups whose members form teams, in group order.
    pub fn team_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.role.forms_teams())
    }

    /// Every placed player across all groups, including the available pool.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.groups.iter().flat_map(|g| g.players())
    }

    /// Players still waiting in the available pool.
    pub fn unassigned(&self) -> usize {
        self.get(GroupRole::Available).map_or(0, Group::occupied)
    }
}

/// Errors from forming or editing groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// Every team group is empty.
    NoPlayers,
    /// The strategy needs this group to hold at least one player.
    EmptyGroup(GroupRole),
    /// Players are still waiting in the available pool.
    UnassignedPlayers(usize),
    /// The draw has no group with this role.
    UnknownGroup(GroupRole),
    SlotOutOfRange { role: GroupRole, index: usize, len: usize },
    /// No draw has been made for a tournament yet.
    NotInitialized,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::NoPlayers => write!(f, "No players to form teams"),
            DrawError::EmptyGroup(role) => write!(f, "Group {} has no players", role),
            DrawError::UnassignedPlayers(n) => {
                write!(f, "{} player(s) still need to be picked into a slot", n)
            }
            DrawError::UnknownGroup(role) => write!(f, "This draw has no group {}", role),
            DrawError::SlotOutOfRange { role, index, len } => {
                write!(f, "Slot {} is out of range for group {} (size {})", index, role, len)
            }
            DrawError::NotInitialized => write!(f, "No draw has been made yet"),
        }
    }
}

impl std::error::Error for DrawError {}
