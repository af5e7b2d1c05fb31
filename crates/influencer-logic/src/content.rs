//! Content quality, views, virality and follower rolls.
//!
//! # Quality
//!
//! Quality is deterministic: the two skills tied to the content kind give
//! a multiplier of `1 + 0.2 × (a + b)`, the mean quality of the player's
//! capture gear (phone, camera, microphone, lighting) gives
//! `1 + 0.3 × (mean − 1)`, and the floored product is clamped to `[1, 10]`.
//!
//! # Rolls
//!
//! Everything else is a dice roll made in a fixed order so a scripted
//! source can force outcomes: views first, then virality, then the viral
//! multiplier (only when viral), then the follower jitter.

use crate::careers::ContentKind;
use crate::constants::limits::{QUALITY_MAX, QUALITY_MIN};
use crate::dice::RandomSource;
use crate::equipment::Equipment;
use crate::skills::SkillSet;
use serde::{Deserialize, Serialize};

/// Hard ceiling on the chance that a piece of content goes viral.
pub const MAX_VIRAL_PROBABILITY: f64 = 0.05;

pub fn skill_multiplier(skills: &SkillSet, kind: ContentKind) -> f64 {
    let [a, b] = kind.skills();
    1.0 + 0.2 * (f64::from(skills.level(a)) + f64::from(skills.level(b)))
}

pub fn equipment_multiplier(equipment: &[Equipment]) -> f64 {
    let relevant: Vec<f64> = equipment
        .iter()
        .filter(|e| e.category.affects_quality())
        .map(|e| f64::from(e.quality))
        .collect();
    if relevant.is_empty() {
        return 1.0;
    }
    let mean = relevant.iter().sum::<f64>() / relevant.len() as f64;
    1.0 + 0.3 * (mean - 1.0)
}

pub fn content_quality(skills: &SkillSet, equipment: &[Equipment], kind: ContentKind) -> u8 {
    let raw = (skill_multiplier(skills, kind) * equipment_multiplier(equipment)).floor();
    raw.clamp(f64::from(QUALITY_MIN), f64::from(QUALITY_MAX)) as u8
}

/// Chance in `[0.001, 0.05]` that content of this quality goes viral.
pub fn viral_probability(quality: u8) -> f64 {
    (0.001 + f64::from(quality) * 0.002).min(MAX_VIRAL_PROBABILITY)
}

pub fn is_viral(quality: u8, rng: &mut impl RandomSource) -> bool {
    rng.chance(viral_probability(quality))
}

/// Views for a fresh piece of content: `[0, 1000)` plus 100 per quality point.
pub fn roll_views(quality: u8, rng: &mut impl RandomSource) -> i64 {
    rng.random_int(0, 1000) + i64::from(quality) * 100
}

/// Followers won by one piece of content.
///
/// Base is 10 per quality point. Viral content multiplies that by a roll in
/// `[10, 60)`. A final jitter in `[0.8, 1.2)` is applied before flooring.
pub fn follower_gain(quality: u8, viral: bool, rng: &mut impl RandomSource) -> i64 {
    let mut base = i64::from(quality) * 10;
    if viral {
        base *= rng.random_int(10, 60);
    }
    let jitter = rng.random_f64(0.8, 1.2);
    (base as f64 * jitter).floor().max(0.0) as i64
}

/// Money earned from views: one unit per hundred views.
pub fn revenue_for_views(views: i64) -> i64 {
    (views as f64 * 0.01).floor().max(0.0) as i64
}

pub fn likes_for_views(views: i64) -> i64 {
    (views as f64 * 0.1).floor().max(0.0) as i64
}

pub fn comments_for_views(views: i64) -> i64 {
    (views as f64 * 0.05).floor().max(0.0) as i64
}

/// Everything rolled when a piece of content is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRoll {
    pub quality: u8,
    pub views: i64,
    pub viral: bool,
    pub followers: i64,
    pub revenue: i64,
}

/// Roll a full publication outcome.
pub fn roll_content(
    skills: &SkillSet,
    equipment: &[Equipment],
    kind: ContentKind,
    rng: &mut impl RandomSource,
) -> ContentRoll {
    let quality = content_quality(skills, equipment, kind);
    let views = roll_views(quality, rng);
    let viral = is_viral(quality, rng);
    let followers = follower_gain(quality, viral, rng);
    ContentRoll {
        quality,
        views,
        viral,
        followers,
        revenue: revenue_for_views(views),
    }
}
