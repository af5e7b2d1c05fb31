//! Player stats and event effects.
//!
//! Happiness, energy and reputation live in `[0, 100]`. Followers and money
//! are floored at zero with no ceiling, so a bad event can wipe them out but
//! never drive them negative.

use crate::constants::{limits, start};
use serde::{Deserialize, Serialize};

/// Names of the five player stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Followers,
    Money,
    Happiness,
    Energy,
    Reputation,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Followers,
        Stat::Money,
        Stat::Happiness,
        Stat::Energy,
        Stat::Reputation,
    ];

    /// Upper bound for the stat, if it has one.
    pub fn ceiling(self) -> Option<i64> {
        match self {
            Stat::Followers | Stat::Money => None,
            Stat::Happiness | Stat::Energy | Stat::Reputation => Some(limits::STAT_MAX),
        }
    }

    /// Bring a raw value into this stat's range.
    pub fn clamp(self, value: i64) -> i64 {
        let floored = value.max(limits::STAT_MIN);
        match self.ceiling() {
            Some(max) => floored.min(max),
            None => floored,
        }
    }

    pub fn in_range(self, value: i64) -> bool {
        self.clamp(value) == value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub followers: i64,
    pub money: i64,
    pub happiness: i64,
    pub energy: i64,
    pub reputation: i64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            followers: start::FOLLOWERS,
            money: start::MONEY,
            happiness: start::HAPPINESS,
            energy: start::ENERGY,
            reputation: start::REPUTATION,
        }
    }
}

impl PlayerStats {
    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Followers => self.followers,
            Stat::Money => self.money,
            Stat::Happiness => self.happiness,
            Stat::Energy => self.energy,
            Stat::Reputation => self.reputation,
        }
    }

    /// Set a stat, clamped to its range.
    pub fn set(&mut self, stat: Stat, value: i64) {
        let v = stat.clamp(value);
        match stat {
            Stat::Followers => self.followers = v,
            Stat::Money => self.money = v,
            Stat::Happiness => self.happiness = v,
            Stat::Energy => self.energy = v,
            Stat::Reputation => self.reputation = v,
        }
    }

    /// Add a signed delta to a stat, clamped to its range.
    pub fn adjust(&mut self, stat: Stat, delta: i64) {
        self.set(stat, self.get(stat).saturating_add(delta));
    }

    /// Apply every delta of an effect set.
    ///
    /// Each delta is taken against the stats as they were before the call,
    /// so the order of stats in the effect never matters.
    pub fn apply_effects(&mut self, effects: &StatEffects) {
        let before = *self;
        for (stat, delta) in effects.iter() {
            self.set(stat, before.get(stat).saturating_add(delta));
        }
    }

    /// First stat found outside its range, with its value.
    pub fn out_of_range(&self) -> Option<(Stat, i64)> {
        Stat::ALL
            .iter()
            .map(|s| (*s, self.get(*s)))
            .find(|(s, v)| !s.in_range(*v))
    }
}

/// Partial map of stat deltas carried by an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEffects {
    pub followers: Option<i64>,
    pub money: Option<i64>,
    pub happiness: Option<i64>,
    pub energy: Option<i64>,
    pub reputation: Option<i64>,
}

impl StatEffects {
    pub fn get(&self, stat: Stat) -> Option<i64> {
        match stat {
            Stat::Followers => self.followers,
            Stat::Money => self.money,
            Stat::Happiness => self.happiness,
            Stat::Energy => self.energy,
            Stat::Reputation => self.reputation,
        }
    }

    /// Present, non-zero deltas in `Stat::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i64)> + '_ {
        Stat::ALL
            .iter()
            .filter_map(|s| self.get(*s).map(|d| (*s, d)))
            .filter(|(_, d)| *d != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_new_game() {
        let stats = PlayerStats::default();
        assert_eq!(stats.followers, 0);
        assert_eq!(stats.money, 100);
        assert_eq!(stats.happiness, 50);
        assert_eq!(stats.energy, 100);
        assert_eq!(stats.reputation, 50);
    }

    #[test]
    fn test_bounded_stats_clamp_both_ways() {
        let mut stats = PlayerStats::default();
        stats.adjust(Stat::Energy, 50);
        assert_eq!(stats.energy, 100);
        stats.adjust(Stat::Happiness, -500);
        assert_eq!(stats.happiness, 0);
        stats.set(Stat::Reputation, 101);
        assert_eq!(stats.reputation, 100);
    }

    #[test]
    fn test_open_stats_floor_at_zero_only() {
        let mut stats = PlayerStats::default();
        stats.adjust(Stat::Followers, 5_000);
        assert_eq!(stats.followers, 5_000);
        stats.adjust(Stat::Money, -1_000);
        assert_eq!(stats.money, 0);
    }

    #[test]
    fn test_apply_effects_uses_prior_values() {
        let mut stats = PlayerStats {
            followers: 10,
            money: 0,
            happiness: 95,
            energy: 5,
            reputation: 50,
        };
        let effects = StatEffects {
            followers: Some(-30),
            happiness: Some(20),
            energy: Some(-10),
            reputation: Some(10),
            ..Default::default()
        };
        stats.apply_effects(&effects);
        assert_eq!(stats.followers, 0);
        assert_eq!(stats.money, 0);
        assert_eq!(stats.happiness, 100);
        assert_eq!(stats.energy, 0);
        assert_eq!(stats.reputation, 60);
    }

    #[test]
    fn test_effects_iter_skips_absent_and_zero() {
        let effects = StatEffects {
            money: Some(100),
            energy: Some(0),
            ..Default::default()
        };
        let pairs: Vec<_> = effects.iter().collect();
        assert_eq!(pairs, vec![(Stat::Money, 100)]);
        assert!(StatEffects::default().is_empty());
    }

    #[test]
    fn test_out_of_range_detection() {
        let mut stats = PlayerStats::default();
        assert_eq!(stats.out_of_range(), None);
        stats.energy = 140;
        assert_eq!(stats.out_of_range(), Some((Stat::Energy, 140)));
    }
}
