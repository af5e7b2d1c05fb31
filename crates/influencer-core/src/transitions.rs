//! Pure game transitions.
//!
//! Every operation takes the current snapshot by reference and returns a
//! brand new one, or a [`Rejection`] explaining why nothing happened. The
//! input is never touched, so a rejected action is a no-op by construction.
//!
//! Randomness and time are passed in. Given the same snapshot, dice and
//! timestamp, a transition always produces the same result.

use chrono::{DateTime, Utc};
use influencer_logic::careers::{Career, ContentKind, Skill};
use influencer_logic::clock::advance_hour;
use influencer_logic::constants::{costs, limits};
use influencer_logic::content::{comments_for_views, likes_for_views, roll_content, ContentRoll};
use influencer_logic::dice::RandomSource;
use influencer_logic::equipment::find_catalog_item;
use influencer_logic::progression::level_for_experience;
use influencer_logic::room::room_description;
use influencer_logic::skills::{is_maxed, practice_cost};
use influencer_logic::stats::Stat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::{maybe_generate_event, push_capped, DAILY_EVENT_CHANCE};
use crate::snapshot::{GameSnapshot, Player, ViralVideo};

/// Why an action left the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no game in progress")]
    NotStarted,

    #[error("game is paused")]
    Paused,

    #[error("player name is empty")]
    EmptyName,

    #[error("content title is blank")]
    BlankTitle,

    #[error("not enough energy: need {needed}, have {available}")]
    NotEnoughEnergy { needed: i64, available: i64 },

    #[error("not enough money: need {needed}, have {available}")]
    NotEnoughMoney { needed: i64, available: i64 },

    #[error("skill is already maxed")]
    SkillMaxed,

    #[error("skill is not part of this career")]
    SkillNotInCareer,

    #[error("content kind is not part of this career")]
    ContentNotInCareer,

    #[error("no such equipment")]
    UnknownEquipment,

    #[error("price does not match the catalog")]
    PriceMismatch,

    #[error("equipment already owned")]
    AlreadyOwned,

    #[error("player level too low: need {required}, at {current}")]
    LevelTooLow { required: u32, current: u32 },
}

/// Tunables for the day-start roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub daily_event_chance: f64,
    pub event_log_cap: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            daily_event_chance: DAILY_EVENT_CHANCE,
            event_log_cap: limits::EVENT_LOG_CAP,
        }
    }
}

/// Accept actions only while a game is running and not paused.
pub fn ensure_playing(snapshot: &GameSnapshot) -> Result<(), Rejection> {
    if !snapshot.started {
        return Err(Rejection::NotStarted);
    }
    if snapshot.paused {
        return Err(Rejection::Paused);
    }
    Ok(())
}

fn ensure_energy(player: &Player, needed: i64) -> Result<(), Rejection> {
    let available = player.stats.energy;
    if available < needed {
        return Err(Rejection::NotEnoughEnergy { needed, available });
    }
    Ok(())
}

fn ensure_money(player: &Player, needed: i64) -> Result<(), Rejection> {
    let available = player.stats.money;
    if available < needed {
        return Err(Rejection::NotEnoughMoney { needed, available });
    }
    Ok(())
}

fn gain_experience(player: &mut Player, amount: u64) {
    player.experience = player.experience.saturating_add(amount);
    player.level = level_for_experience(player.experience, player.level);
}

/// One in-game hour, including the day-start logic on rollover.
fn step_hour(
    snapshot: &mut GameSnapshot,
    rules: &Rules,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) {
    let step = advance_hour(snapshot.day, snapshot.hour);
    snapshot.day = step.day;
    snapshot.hour = step.hour;
    if !step.new_day {
        return;
    }

    snapshot
        .player
        .stats
        .adjust(Stat::Energy, costs::OVERNIGHT_ENERGY);

    if let Some(event) =
        maybe_generate_event(rng, rules.daily_event_chance, snapshot.next_id, now)
    {
        snapshot.allocate_id();
        snapshot.player.stats.apply_effects(&event.effects);
        push_capped(&mut snapshot.events, event, rules.event_log_cap);
    }
}

/// Fresh game for a named player.
pub fn start_new_game(name: &str, career: Career) -> Result<GameSnapshot, Rejection> {
    if name.trim().is_empty() {
        return Err(Rejection::EmptyName);
    }
    Ok(GameSnapshot::new_game(name, career))
}

/// Publish a piece of content.
///
/// Returns the new snapshot together with what was rolled.
pub fn create_content(
    snapshot: &GameSnapshot,
    kind: ContentKind,
    title: &str,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Result<(GameSnapshot, ContentRoll), Rejection> {
    ensure_playing(snapshot)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(Rejection::BlankTitle);
    }
    if let Some(career) = snapshot.player.career {
        if !career.can_create(kind) {
            return Err(Rejection::ContentNotInCareer);
        }
    }
    ensure_energy(&snapshot.player, costs::CONTENT_ENERGY)?;

    let mut next = snapshot.clone();
    let roll = roll_content(&next.player.skills, &next.room.equipment, kind, rng);
    let id = next.allocate_id();

    let stats = &mut next.player.stats;
    stats.adjust(Stat::Energy, -costs::CONTENT_ENERGY);
    stats.adjust(Stat::Followers, roll.followers);
    stats.adjust(Stat::Money, roll.revenue);
    gain_experience(&mut next.player, costs::CONTENT_EXPERIENCE);

    if roll.viral {
        next.viral_videos.push(ViralVideo {
            id,
            title: title.to_string(),
            views: roll.views,
            likes: likes_for_views(roll.views),
            comments: comments_for_views(roll.views),
            revenue: roll.revenue,
            timestamp: now,
        });
    }

    Ok((next, roll))
}

/// One practice session on a career skill.
pub fn practice_skill(snapshot: &GameSnapshot, skill: Skill) -> Result<GameSnapshot, Rejection> {
    ensure_playing(snapshot)?;
    let allowed = snapshot
        .player
        .career
        .is_some_and(|career| career.can_practice(skill));
    if !allowed {
        return Err(Rejection::SkillNotInCareer);
    }

    let level = snapshot.player.skills.level(skill);
    if is_maxed(level) {
        return Err(Rejection::SkillMaxed);
    }
    let cost = practice_cost(level);
    ensure_energy(&snapshot.player, cost.energy)?;
    ensure_money(&snapshot.player, cost.money)?;

    let mut next = snapshot.clone();
    if next.player.skills.practice(skill).is_none() {
        return Err(Rejection::SkillMaxed);
    }
    next.player.stats.adjust(Stat::Energy, -cost.energy);
    next.player.stats.adjust(Stat::Money, -cost.money);
    gain_experience(&mut next.player, costs::PRACTICE_EXPERIENCE);
    Ok(next)
}

/// Buy a catalog item at its listed price.
pub fn purchase_equipment(
    snapshot: &GameSnapshot,
    equipment_id: &str,
    price: i64,
) -> Result<GameSnapshot, Rejection> {
    ensure_playing(snapshot)?;
    let item = find_catalog_item(equipment_id).ok_or(Rejection::UnknownEquipment)?;
    if item.price != price {
        return Err(Rejection::PriceMismatch);
    }
    if snapshot.room.owns(item.id) {
        return Err(Rejection::AlreadyOwned);
    }
    if snapshot.player.level < item.level_required {
        return Err(Rejection::LevelTooLow {
            required: item.level_required,
            current: snapshot.player.level,
        });
    }
    ensure_money(&snapshot.player, item.price)?;

    let mut next = snapshot.clone();
    next.player.stats.adjust(Stat::Money, -item.price);
    next.room.equipment.push(item.to_equipment());

    let purchased = next
        .room
        .equipment
        .iter()
        .filter(|e| find_catalog_item(&e.id).is_some())
        .count() as u32;
    next.room.level = (1 + purchased).min(limits::ROOM_LEVEL_MAX);
    next.room.description = room_description(next.room.level, &next.room.equipment);
    Ok(next)
}

/// Recover energy and mood; takes two in-game hours.
pub fn rest(
    snapshot: &GameSnapshot,
    rules: &Rules,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Result<GameSnapshot, Rejection> {
    ensure_playing(snapshot)?;
    let mut next = snapshot.clone();
    next.player.stats.adjust(Stat::Energy, costs::REST_ENERGY);
    next.player.stats.adjust(Stat::Happiness, costs::REST_HAPPINESS);
    for _ in 0..costs::REST_HOURS {
        step_hour(&mut next, rules, rng, now);
    }
    Ok(next)
}

/// Advance the clock one hour.
pub fn advance_time(
    snapshot: &GameSnapshot,
    rules: &Rules,
    rng: &mut impl RandomSource,
    now: DateTime<Utc>,
) -> Result<GameSnapshot, Rejection> {
    ensure_playing(snapshot)?;
    let mut next = snapshot.clone();
    step_hour(&mut next, rules, rng, now);
    Ok(next)
}

pub fn set_paused(snapshot: &GameSnapshot, paused: bool) -> Result<GameSnapshot, Rejection> {
    if !snapshot.started {
        return Err(Rejection::NotStarted);
    }
    let mut next = snapshot.clone();
    next.paused = paused;
    Ok(next)
}
