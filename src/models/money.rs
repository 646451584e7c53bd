//! Currency amounts and tournament fee settings.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A currency amount in whole cents.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Round to the nearest multiple of `unit` (halves away from zero).
    pub fn round_to(self, unit: Money) -> Money {
        if unit.0 <= 0 {
            return self;
        }
        Money(((self.0 as f64 / unit.0 as f64).round() as i64) * unit.0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

/// Per-player fees collected at the board, plus any house bonus.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FeeSettings {
    pub entry_fee: Money,
    /// Added to the pot by the bar, per player.
    #[serde(default)]
    pub bar_contribution: Money,
    /// Taken out of the pot, per player.
    #[serde(default)]
    pub usage_fee: Money,
    /// Flat amount added to the pot.
    #[serde(default)]
    pub bonus_money: Money,
}

impl FeeSettings {
    /// Total prize pool for `players` entrants, never below zero.
    pub fn prize_pool(&self, players: usize) -> Money {
        let per_player = self.entry_fee + self.bar_contribution - self.usage_fee;
        let pool = per_player * players as i64 + self.bonus_money;
        if pool.is_negative() {
            Money::ZERO
        } else {
            pool
        }
    }
}
