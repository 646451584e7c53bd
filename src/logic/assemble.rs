//! Pair groups into teams by slot position.

use crate::models::{DrawError, Groups, Strategy, Team};

/// Form teams position by position across all team groups (the available pool is ignored).
///
/// At index `i` the team is every occupied `group[i]`, in group order. A position
/// with a single occupant gives a solo team; a position with none is skipped.
pub fn assemble(groups: &Groups) -> Vec<Team> {
    let team_groups: Vec<_> = groups.team_groups().collect();
    let depth = team_groups.iter().map(|g| g.len()).max().unwrap_or(0);
    (0..depth)
        .filter_map(|i| {
            let members: Vec<_> = team_groups
                .iter()
                .filter_map(|g| g.slots.get(i).and_then(Option::as_ref))
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(Team::from_members(&members))
            }
        })
        .collect()
}

/// Check that the groups are ready for team generation, then assemble them.
///
/// Fails if no team group holds a player, if a group the strategy relies on is
/// empty, or if players are still waiting to be picked.
pub fn generate_teams(groups: &Groups, strategy: Strategy) -> Result<Vec<Team>, DrawError> {
    if groups.team_groups().all(|g| g.occupied() == 0) {
        return Err(DrawError::NoPlayers);
    }
    for &role in strategy.required_groups() {
        let group = groups.get(role).ok_or(DrawError::UnknownGroup(role))?;
        if group.occupied() == 0 {
            return Err(DrawError::EmptyGroup(role));
        }
    }
    let unassigned = groups.unassigned();
    if unassigned > 0 {
        return Err(DrawError::UnassignedPlayers(unassigned));
    }
    Ok(assemble(groups))
}
