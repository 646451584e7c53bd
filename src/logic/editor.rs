//! Manual edits between groups: swaps (including moves into empty slots) and shuffles.
//!
//! Edits never change a group's size and never add or drop a player.

use crate::models::{DrawError, GroupRole, Groups};
use rand::seq::SliceRandom;
use rand::Rng;

fn check_slot(groups: &Groups, role: GroupRole, index: usize) -> Result<usize, DrawError> {
    let gi = groups.position(role).ok_or(DrawError::UnknownGroup(role))?;
    let len = groups.groups[gi].len();
    if index >= len {
        return Err(DrawError::SlotOutOfRange { role, index, len });
    }
    Ok(gi)
}

/// Exchange the occupants of two slots, within one group or across groups.
/// Either occupant may be an empty placeholder.
pub fn swap(
    groups: &mut Groups,
    from: GroupRole,
    from_index: usize,
    to: GroupRole,
    to_index: usize,
) -> Result<(), DrawError> {
    let fg = check_slot(groups, from, from_index)?;
    let tg = check_slot(groups, to, to_index)?;
    if fg == tg {
        groups.groups[fg].slots.swap(from_index, to_index);
    } else {
        let taken = groups.groups[fg].slots[from_index].take();
        let displaced = std::mem::replace(&mut groups.groups[tg].slots[to_index], taken);
        groups.groups[fg].slots[from_index] = displaced;
    }
    log::debug!("Swapped {}[{}] with {}[{}]", from, from_index, to, to_index);
    Ok(())
}

/// Randomly permute one group's slots using the thread-local RNG.
pub fn shuffle(groups: &mut Groups, role: GroupRole) -> Result<(), DrawError> {
    shuffle_with_rng(groups, role, &mut rand::thread_rng())
}

pub fn shuffle_with_rng<R: Rng + ?Sized>(
    groups: &mut Groups,
    role: GroupRole,
    rng: &mut R,
) -> Result<(), DrawError> {
    let group = groups.get_mut(role).ok_or(DrawError::UnknownGroup(role))?;
    group.slots.shuffle(rng);
    log::debug!("Shuffled group {} ({} slot(s))", role, group.len());
    Ok(())
}
