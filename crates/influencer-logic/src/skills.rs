//! Skill levels, practice gains and practice costs.
//!
//! Skills run from 0 to 7. Practice adds 0.5 while a skill is below 3 and
//! 0.2 after that, and the cost of a session rises in tiers with the level
//! being trained.
//!
//! ```
//! use influencer_logic::careers::Skill;
//! use influencer_logic::skills::{practice_cost, SkillSet};
//!
//! let mut skills = SkillSet::default();
//! assert_eq!(skills.level(Skill::Charisma), 0.0);
//! skills.practice(Skill::Charisma);
//! assert_eq!(skills.level(Skill::Charisma), 0.5);
//! assert_eq!(practice_cost(3.0).money, 150);
//! ```

use crate::careers::Skill;
use crate::constants::limits::SKILL_MAX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Level below which practice gains the larger step.
pub const FAST_GROWTH_BELOW: f32 = 3.0;

/// Sparse skill levels; skills never practiced read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeMap<Skill, f32>);

impl SkillSet {
    pub fn level(&self, skill: Skill) -> f32 {
        self.0.get(&skill).copied().unwrap_or(0.0)
    }

    /// Set a level, clamped to `[0, 7]` and rounded to one decimal.
    pub fn set(&mut self, skill: Skill, level: f32) {
        self.0.insert(skill, round_tenth(level.clamp(0.0, SKILL_MAX)));
    }

    /// Practice once; returns the new level, or `None` when already maxed.
    pub fn practice(&mut self, skill: Skill) -> Option<f32> {
        let current = self.level(skill);
        if is_maxed(current) {
            return None;
        }
        let next = next_level(current);
        self.0.insert(skill, next);
        Some(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, f32)> + '_ {
        self.0.iter().map(|(s, l)| (*s, *l))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Skill, f32)> for SkillSet {
    fn from_iter<I: IntoIterator<Item = (Skill, f32)>>(iter: I) -> Self {
        let mut set = SkillSet::default();
        for (skill, level) in iter {
            set.set(skill, level);
        }
        set
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

pub fn is_maxed(level: f32) -> bool {
    level >= SKILL_MAX
}

/// Step added by one practice session at `level` (0 at the cap).
pub fn practice_gain(level: f32) -> f32 {
    if is_maxed(level) {
        0.0
    } else if level < FAST_GROWTH_BELOW {
        0.5
    } else {
        0.2
    }
}

/// Level after one practice session, capped at 7.
pub fn next_level(level: f32) -> f32 {
    round_tenth((level + practice_gain(level)).min(SKILL_MAX))
}

/// Energy and money charged for a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeCost {
    pub energy: i64,
    pub money: i64,
}

/// Cost of practicing a skill currently at `level`.
///
/// * below 3: 15 energy, free
/// * 3 up to 5: 25 energy, `level × 50` money
/// * 5 and above: 40 energy, `level × 100` money
pub fn practice_cost(level: f32) -> PracticeCost {
    let level = f64::from(level);
    if level >= 5.0 {
        PracticeCost {
            energy: 40,
            money: (level * 100.0).round() as i64,
        }
    } else if level >= 3.0 {
        PracticeCost {
            energy: 25,
            money: (level * 50.0).round() as i64,
        }
    } else {
        PracticeCost {
            energy: 15,
            money: 0,
        }
    }
}
