//! Draw strategies: order a roster and split it into groups.
//!
//! Every strategy is the same pipeline with a different [`DrawPolicy`]:
//! 1. Order the roster (by skill descending, at random, or as entered).
//! 2. Split it into halves, thirds, or alternating partners.
//! 3. Optionally reverse the second half (weakest first).
//! 4. Seed both halves automatically, or leave one side as empty slots with
//!    its players parked in the `Available` pool for manual picks.

use crate::models::{Group, GroupRole, Groups, Player, ScoreKey, Strategy};
use rand::seq::SliceRandom;
use rand::Rng;

/// How the roster is ordered before splitting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawOrder {
    /// Descending by the chosen score; ties keep roster order.
    Skill,
    /// Uniform random permutation.
    Random,
    /// Order players were added.
    Roster,
}

/// How the ordered roster is cut into groups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Split {
    /// First `ceil(n/2)` and the rest.
    Halves,
    /// Three contiguous tiers of `ceil(n/3)`; the last takes the remainder.
    Thirds,
    /// Even roster positions vs odd roster positions.
    Alternate,
}

/// Which half, if any, is left for manual picks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Seeding {
    Auto,
    /// A starts as empty slots; the top half waits in the pool.
    PickIntoA,
    /// B starts as empty slots; the bottom half waits in the pool.
    PickIntoB,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawPolicy {
    pub order: DrawOrder,
    pub split: Split,
    /// Put the second half weakest-first.
    pub reverse_second: bool,
    pub seeding: Seeding,
}

impl Strategy {
    pub fn policy(self) -> DrawPolicy {
        let (order, split, reverse_second, seeding) = match self {
            Strategy::AbDraw => (DrawOrder::Skill, Split::Halves, false, Seeding::Auto),
            Strategy::BlindDraw => (DrawOrder::Random, Split::Halves, false, Seeding::Auto),
            Strategy::ParityDraw => (DrawOrder::Skill, Split::Halves, true, Seeding::Auto),
            Strategy::PartnerBring => (DrawOrder::Roster, Split::Alternate, false, Seeding::Auto),
            Strategy::LowPlayerPick => (DrawOrder::Skill, Split::Halves, true, Seeding::PickIntoA),
            Strategy::HighPlayerPick => {
                (DrawOrder::Skill, Split::Halves, false, Seeding::PickIntoB)
            }
            Strategy::AbcTrios => (DrawOrder::Skill, Split::Thirds, false, Seeding::Auto),
        };
        DrawPolicy {
            order,
            split,
            reverse_second,
            seeding,
        }
    }

    /// Groups that must hold at least one player before teams can be generated.
    pub fn required_groups(self) -> &'static [GroupRole] {
        match self {
            Strategy::LowPlayerPick | Strategy::HighPlayerPick => &[GroupRole::A, GroupRole::B],
            Strategy::PartnerBring => &[GroupRole::Player1],
            _ => &[GroupRole::A],
        }
    }

    /// Whether the strategy leaves players for manual picks.
    pub fn is_pick(self) -> bool {
        self.policy().seeding != Seeding::Auto
    }
}

/// Copy of the roster sorted descending by `key`. The sort is stable.
pub fn sort_by_score(roster: &[Player], key: ScoreKey) -> Vec<Player> {
    let mut sorted = roster.to_vec();
    sorted.sort_by(|a, b| b.score(key).total_cmp(&a.score(key)));
    sorted
}

/// Split a roster into groups using the thread-local RNG for random draws.
pub fn partition(roster: &[Player], strategy: Strategy, key: ScoreKey) -> Groups {
    partition_with_rng(roster, strategy, key, &mut rand::thread_rng())
}

/// Split a roster into groups. `rng` is only consulted by strategies that draw at random.
pub fn partition_with_rng<R: Rng + ?Sized>(
    roster: &[Player],
    strategy: Strategy,
    key: ScoreKey,
    rng: &mut R,
) -> Groups {
    let policy = strategy.policy();
    let ordered = match policy.order {
        DrawOrder::Skill => sort_by_score(roster, key),
        DrawOrder::Random => {
            let mut shuffled = roster.to_vec();
            shuffled.shuffle(rng);
            shuffled
        }
        DrawOrder::Roster => roster.to_vec(),
    };
    let groups = split(&policy, ordered);
    log::debug!(
        "Partitioned {} player(s) with {:?} by {:?} into {} group(s)",
        roster.len(),
        strategy,
        key,
        groups.groups.len()
    );
    groups
}

fn split(policy: &DrawPolicy, ordered: Vec<Player>) -> Groups {
    match policy.split {
        Split::Alternate => {
            let (evens, odds): (Vec<_>, Vec<_>) = ordered
                .into_iter()
                .enumerate()
                .partition(|(i, _)| i % 2 == 0);
            Groups::new(vec![
                Group::new(GroupRole::Player1, evens.into_iter().map(|(_, p)| p).collect()),
                Group::new(GroupRole::Player2, odds.into_iter().map(|(_, p)| p).collect()),
            ])
        }
        Split::Thirds => {
            let tier = ordered.len().div_ceil(3);
            let mut a = ordered;
            let mut b = a.split_off(tier.min(a.len()));
            let c = b.split_off(tier.min(b.len()));
            Groups::new(vec![
                Group::new(GroupRole::A, a),
                Group::new(GroupRole::B, b),
                Group::new(GroupRole::C, c),
            ])
        }
        Split::Halves => {
            let mut top = ordered;
            let mut bottom = top.split_off(top.len().div_ceil(2));
            if policy.reverse_second {
                bottom.reverse();
            }
            match policy.seeding {
                Seeding::Auto => Groups::new(vec![
                    Group::new(GroupRole::A, top),
                    Group::new(GroupRole::B, bottom),
                ]),
                Seeding::PickIntoA => Groups::new(vec![
                    Group::empty_slots(GroupRole::A, top.len()),
                    Group::new(GroupRole::B, bottom),
                    Group::new(GroupRole::Available, top),
                ]),
                Seeding::PickIntoB => Groups::new(vec![
                    Group::new(GroupRole::A, top),
                    Group::empty_slots(GroupRole::B, bottom.len()),
                    Group::new(GroupRole::Available, bottom),
                ]),
            }
        }
    }
}
