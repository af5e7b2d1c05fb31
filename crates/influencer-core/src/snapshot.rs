//! Game snapshot: the complete, serializable state of one game.
//!
//! A snapshot is never edited in place by the session. Every transition
//! clones it, changes the clone and hands the new value back, so the old
//! snapshot stays valid until the session swaps it out.

use chrono::{DateTime, Utc};
use influencer_logic::careers::{Career, Skill};
use influencer_logic::constants::{limits, start};
use influencer_logic::equipment::{Equipment, STARTER_PHONE};
use influencer_logic::room::room_description;
use influencer_logic::skills::SkillSet;
use influencer_logic::stats::{PlayerStats, Stat, StatEffects};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub career: Option<Career>,
    pub stats: PlayerStats,
    pub skills: SkillSet,
    pub level: u32,
    /// Cumulative experience; never reset on level-up.
    pub experience: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: String::new(),
            career: None,
            stats: PlayerStats::default(),
            skills: SkillSet::default(),
            level: start::PLAYER_LEVEL,
            experience: 0,
        }
    }
}

/// The player's room and everything in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub level: u32,
    /// In acquisition order.
    pub equipment: Vec<Equipment>,
    pub decorations: Vec<String>,
    pub description: String,
}

impl Default for Room {
    fn default() -> Self {
        let equipment = vec![STARTER_PHONE.to_equipment()];
        Self {
            level: start::ROOM_LEVEL,
            description: room_description(start::ROOM_LEVEL, &equipment),
            equipment,
            decorations: Vec::new(),
        }
    }
}

impl Room {
    pub fn owns(&self, equipment_id: &str) -> bool {
        self.equipment.iter().any(|e| e.id == equipment_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Viral,
    Cancellation,
    Harassment,
    Opportunity,
    TechnicalProblem,
}

impl EventKind {
    /// Does this event leave the player better off?
    pub fn is_positive(self) -> bool {
        matches!(self, EventKind::Viral | EventKind::Opportunity)
    }
}

/// Something that happened to the player overnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub effects: StatEffects,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViralVideo {
    pub id: u64,
    pub title: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub revenue: i64,
    pub timestamp: DateTime<Utc>,
}

/// Coarse lifecycle state derived from the `started`/`paused` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: Player,
    pub room: Room,
    /// Most recent events, oldest first, capped.
    pub events: Vec<Event>,
    pub viral_videos: Vec<ViralVideo>,
    pub day: u32,
    pub hour: u8,
    pub started: bool,
    pub paused: bool,
    /// Next id handed out to content and events.
    pub next_id: u64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            player: Player::default(),
            room: Room::default(),
            events: Vec::new(),
            viral_videos: Vec::new(),
            day: start::DAY,
            hour: start::HOUR,
            started: false,
            paused: false,
            next_id: 1,
        }
    }
}

impl GameSnapshot {
    /// Canonical new game for a named player.
    pub fn new_game(name: &str, career: Career) -> Self {
        let mut snapshot = Self::default();
        snapshot.player.name = name.trim().to_string();
        snapshot.player.career = Some(career);
        snapshot.started = true;
        snapshot
    }

    pub fn phase(&self) -> Phase {
        match (self.started, self.paused) {
            (false, _) => Phase::NotStarted,
            (true, false) => Phase::Playing,
            (true, true) => Phase::Paused,
        }
    }

    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn latest_event(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Check every structural invariant a reachable snapshot holds.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some((stat, value)) = self.player.stats.out_of_range() {
            return Err(InvariantViolation::StatOutOfRange { stat, value });
        }
        if let Some((skill, level)) = self
            .player
            .skills
            .iter()
            .find(|(_, l)| !(0.0..=limits::SKILL_MAX).contains(l))
        {
            return Err(InvariantViolation::SkillOutOfRange { skill, level });
        }
        if self.player.level == 0 {
            return Err(InvariantViolation::ZeroLevel("player"));
        }
        if self.room.level == 0 {
            return Err(InvariantViolation::ZeroLevel("room"));
        }
        if self.room.level > limits::ROOM_LEVEL_MAX {
            return Err(InvariantViolation::RoomLevelTooHigh(self.room.level));
        }
        if self.day == 0 {
            return Err(InvariantViolation::ZeroDay);
        }
        if self.hour >= limits::HOURS_PER_DAY {
            return Err(InvariantViolation::HourOutOfRange(self.hour));
        }
        if self.events.len() > limits::EVENT_LOG_CAP {
            return Err(InvariantViolation::EventLogTooLong(self.events.len()));
        }
        if self.paused && !self.started {
            return Err(InvariantViolation::PausedBeforeStart);
        }
        Ok(())
    }
}

/// A snapshot that no sequence of transitions could have produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("stat {stat:?} out of range: {value}")]
    StatOutOfRange { stat: Stat, value: i64 },

    #[error("skill {skill} out of range: {level}")]
    SkillOutOfRange { skill: Skill, level: f32 },

    #[error("{0} level is zero")]
    ZeroLevel(&'static str),

    #[error("room level above {}: {0}", limits::ROOM_LEVEL_MAX)]
    RoomLevelTooHigh(u32),

    #[error("day is zero")]
    ZeroDay,

    #[error("hour out of range: {0}")]
    HourOutOfRange(u8),

    #[error("event log holds {0} entries")]
    EventLogTooLong(usize),

    #[error("paused flag set on a game that never started")]
    PausedBeforeStart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use influencer_logic::room::ROOM_DESCRIPTIONS;

    #[test]
    fn test_canonical_new_game() {
        let snapshot = GameSnapshot::new_game("  Ana ", Career::Streamer);
        assert_eq!(snapshot.player.name, "Ana");
        assert_eq!(snapshot.player.career, Some(Career::Streamer));
        assert_eq!(snapshot.player.stats, PlayerStats::default());
        assert_eq!(snapshot.player.level, 1);
        assert_eq!(snapshot.player.experience, 0);
        assert!(snapshot.player.skills.is_empty());
        assert_eq!(snapshot.room.level, 1);
        assert_eq!(snapshot.room.equipment.len(), 1);
        assert_eq!(snapshot.room.equipment[0].id, "basic-phone");
        assert_eq!(snapshot.room.description, ROOM_DESCRIPTIONS[0]);
        assert_eq!((snapshot.day, snapshot.hour), (1, 8));
        assert_eq!(snapshot.phase(), Phase::Playing);
        assert!(snapshot.check_invariants().is_ok());
    }

    #[test]
    fn test_phase_transitions() {
        let mut snapshot = GameSnapshot::default();
        assert_eq!(snapshot.phase(), Phase::NotStarted);
        snapshot.started = true;
        assert_eq!(snapshot.phase(), Phase::Playing);
        snapshot.paused = true;
        assert_eq!(snapshot.phase(), Phase::Paused);
    }

    #[test]
    fn test_allocate_id_is_monotonic() {
        let mut snapshot = GameSnapshot::default();
        assert_eq!(snapshot.allocate_id(), 1);
        assert_eq!(snapshot.allocate_id(), 2);
        assert_eq!(snapshot.next_id, 3);
    }

    #[test]
    fn test_invariant_violations() {
        let mut snapshot = GameSnapshot::new_game("Ana", Career::Model);
        snapshot.hour = 24;
        assert_eq!(
            snapshot.check_invariants(),
            Err(InvariantViolation::HourOutOfRange(24))
        );

        let mut snapshot = GameSnapshot::new_game("Ana", Career::Model);
        snapshot.player.stats.happiness = -3;
        assert!(matches!(
            snapshot.check_invariants(),
            Err(InvariantViolation::StatOutOfRange { stat: Stat::Happiness, .. })
        ));

        let mut snapshot = GameSnapshot::default();
        snapshot.paused = true;
        assert_eq!(
            snapshot.check_invariants(),
            Err(InvariantViolation::PausedBeforeStart)
        );
    }

    #[test]
    fn test_room_level_capped() {
        let mut snapshot = GameSnapshot::new_game("Ana", Career::Model);
        snapshot.room.level = limits::ROOM_LEVEL_MAX;
        assert!(snapshot.check_invariants().is_ok());
        snapshot.room.level += 1;
        assert_eq!(
            snapshot.check_invariants(),
            Err(InvariantViolation::RoomLevelTooHigh(limits::ROOM_LEVEL_MAX + 1))
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_timestamps() {
        let mut snapshot = GameSnapshot::new_game("Ana", Career::Streamer);
        let timestamp = DateTime::parse_from_rfc3339("2026-03-01T10:15:30.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        snapshot.viral_videos.push(ViralVideo {
            id: 7,
            title: "Hi".into(),
            views: 1200,
            likes: 120,
            comments: 60,
            revenue: 12,
            timestamp,
        });
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.viral_videos[0].timestamp, timestamp);
    }
}
