//! Game constants: starting values, action costs and hard limits.
//!
//! Plain integers grouped by concern so both the state container and the
//! headless harness read the same numbers.

/// Values of a freshly started game.
pub mod start {
    pub const FOLLOWERS: i64 = 0;
    pub const MONEY: i64 = 100;
    pub const HAPPINESS: i64 = 50;
    pub const ENERGY: i64 = 100;
    pub const REPUTATION: i64 = 50;
    pub const PLAYER_LEVEL: u32 = 1;
    pub const ROOM_LEVEL: u32 = 1;
    pub const DAY: u32 = 1;
    pub const HOUR: u8 = 8;
}

/// What each player action costs and grants.
pub mod costs {
    /// Energy spent creating one piece of content.
    pub const CONTENT_ENERGY: i64 = 20;
    pub const CONTENT_EXPERIENCE: u64 = 10;
    pub const PRACTICE_EXPERIENCE: u64 = 5;
    pub const REST_ENERGY: i64 = 30;
    pub const REST_HAPPINESS: i64 = 5;
    /// Hours that pass while resting.
    pub const REST_HOURS: u32 = 2;
    /// Energy recovered by sleeping through midnight.
    pub const OVERNIGHT_ENERGY: i64 = 50;
}

/// Hard bounds the simulation never leaves.
pub mod limits {
    pub const STAT_MIN: i64 = 0;
    /// Ceiling for happiness, energy and reputation.
    pub const STAT_MAX: i64 = 100;
    pub const SKILL_MAX: f32 = 7.0;
    pub const QUALITY_MIN: u8 = 1;
    pub const QUALITY_MAX: u8 = 10;
    pub const ROOM_LEVEL_MAX: u32 = 7;
    pub const EVENT_LOG_CAP: usize = 10;
    pub const HOURS_PER_DAY: u8 = 24;
}
