//! Prize payout schedule: golden-ratio weighting on top of a per-spot floor,
//! rounded to $10 and reconciled so the schedule sums to the pool exactly.

use crate::models::{Money, Tournament};
use serde::{Deserialize, Serialize};

/// Payout amounts are rounded to this unit before reconciliation.
pub const ROUNDING_UNIT: Money = Money::from_dollars(10);

/// Each spot is weighted `(1 / GOLDEN_RATIO)^i`.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Spots from this index on are paid in equal adjacent pairs.
pub const PLATEAU_START: usize = 4;

/// Amount per finishing place (index 0 is first place). Display-only, never persisted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PayoutSchedule {
    pub amounts: Vec<Money>,
    /// Guaranteed minimum per spot (twice the entry fee), or zero when the pool cannot cover it.
    pub floor: Money,
    /// False when the pool was smaller than `2 * entry_fee * spots` and the floor was dropped.
    pub floor_guaranteed: bool,
}

impl PayoutSchedule {
    pub fn total(&self) -> Money {
        self.amounts.iter().copied().sum()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Normalized weights `(1/φ)^i` for `spots` places.
pub fn spot_weights(spots: usize) -> Vec<f64> {
    let ratio = 1.0 / GOLDEN_RATIO;
    let raw: Vec<f64> = (0..spots).map(|i| ratio.powi(i as i32)).collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

fn round_to_unit(cents: f64) -> Money {
    let unit = ROUNDING_UNIT.cents() as f64;
    Money::from_cents(((cents / unit).round() * unit) as i64)
}

/// Build the payout schedule for `spots` places.
///
/// 1. An empty pool pays zero everywhere.
/// 2. Each spot is guaranteed `2 * entry_fee` when the pool covers it for every spot.
/// 3. The rest of the pool is split by golden-ratio weights, each share rounded to $10.
/// 4. From spot 5 on, adjacent pairs both take the larger amount (rounded to $10).
/// 5. Any surplus is taken back $10 at a time from first place downwards, never
///    below the floor; a shortfall goes to first place. The amounts sum to `total_prize_pool`.
///
/// Zero spots yields an empty schedule.
pub fn calculate_payouts(
    total_prize_pool: Money,
    spots: usize,
    entry_fee: Money,
) -> PayoutSchedule {
    let total = if total_prize_pool.is_negative() {
        log::warn!("Negative prize pool {} treated as zero", total_prize_pool);
        Money::ZERO
    } else {
        total_prize_pool
    };
    let floor_guaranteed = total >= entry_fee * 2 * spots as i64;
    if !floor_guaranteed && total > Money::ZERO {
        log::warn!(
            "Prize pool {} cannot cover a {} floor for {} spot(s); paying by weight only",
            total,
            entry_fee * 2,
            spots
        );
    }
    let floor = if floor_guaranteed {
        entry_fee * 2
    } else {
        Money::ZERO
    };

    if spots == 0 || total == Money::ZERO {
        return PayoutSchedule {
            amounts: vec![Money::ZERO; spots],
            floor,
            floor_guaranteed,
        };
    }

    let remaining = total - floor * spots as i64;
    let mut amounts: Vec<Money> = spot_weights(spots)
        .into_iter()
        .map(|w| floor + round_to_unit(remaining.cents() as f64 * w))
        .collect();

    let mut i = PLATEAU_START;
    while i + 1 < spots {
        let top = amounts[i].max(amounts[i + 1]);
        let rounded = top.round_to(ROUNDING_UNIT);
        // An odd floor can round below itself.
        let paired = if rounded < floor { top } else { rounded };
        amounts[i] = paired;
        amounts[i + 1] = paired;
        i += 2;
    }

    reconcile(&mut amounts, total, floor);

    PayoutSchedule {
        amounts,
        floor,
        floor_guaranteed,
    }
}

/// Bring the sum of `amounts` to exactly `total` without taking any spot below `floor`.
/// Requires every amount to be at least `floor` and `total >= floor * amounts.len()`.
fn reconcile(amounts: &mut [Money], total: Money, floor: Money) {
    let sum: Money = amounts.iter().copied().sum();
    let mut surplus = sum - total;
    if surplus.is_negative() {
        amounts[0] -= surplus;
        return;
    }
    let n = amounts.len();
    let mut i = 0;
    while surplus > Money::ZERO {
        let room = (amounts[i] - floor).max(Money::ZERO);
        let step = ROUNDING_UNIT.min(surplus).min(room);
        amounts[i] -= step;
        surplus -= step;
        i = (i + 1) % n;
    }
}

/// Payout schedule for a tournament's current roster and settings.
pub fn tournament_payouts(tournament: &Tournament) -> PayoutSchedule {
    calculate_payouts(
        tournament.prize_pool(),
        tournament.payout_spots as usize,
        tournament.fees.entry_fee,
    )
}
