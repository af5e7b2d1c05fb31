//! Pure simulation logic for Influencer X.
//!
//! Everything here is a function of plain values: skills, equipment,
//! qualities and levels go in, numbers come out. Nothing owns game state
//! and nothing touches storage or the wall clock. Randomness is always
//! injected through [`dice::RandomSource`] so every roll can be replayed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`careers`] | Career, content kind and skill tables (who can make what) |
//! | [`clock`] | Day/hour arithmetic for the simulated clock |
//! | [`constants`] | Starting values, action costs and hard limits |
//! | [`content`] | Content quality, views, virality and follower rolls |
//! | [`dice`] | Injectable random source plus seeded and scripted impls |
//! | [`equipment`] | Equipment catalog, categories and purchase eligibility |
//! | [`progression`] | Experience thresholds and level-ups |
//! | [`room`] | Room description ladder |
//! | [`skills`] | Skill levels, practice gains and practice costs |
//! | [`stats`] | Player stats with per-stat bounds and event effects |

pub mod careers;
pub mod clock;
pub mod constants;
pub mod content;
pub mod dice;
pub mod equipment;
pub mod progression;
pub mod room;
pub mod skills;
pub mod stats;
