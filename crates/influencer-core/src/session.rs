//! Game session: owns the current snapshot and everything a transition needs.
//!
//! The session is the only writer of its snapshot. Each action runs the
//! matching pure transition and either swaps in the result (then autosaves)
//! or, on a [`Rejection`], keeps the old snapshot and logs why.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use influencer_logic::careers::{Career, ContentKind, Skill};
use influencer_logic::content::ContentRoll;
use influencer_logic::dice::{RandomSource, RngSource};

use crate::config::SimConfig;
use crate::persistence::{
    export_binary, import_binary, load_game_from, save_game_to, KeyValueStore, SaveError,
};
use crate::snapshot::{GameSnapshot, Phase};
use crate::transitions::{self, Rejection, Rules};

/// Source of wall-clock timestamps for events and videos.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant; move it by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn advance(&mut self, by: chrono::Duration) {
        self.0 += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// One player's game.
pub struct GameSession<S = RngSource, C = SystemClock> {
    snapshot: GameSnapshot,
    rng: S,
    clock: C,
    store: Option<Box<dyn KeyValueStore>>,
    config: SimConfig,
    rules: Rules,
    /// Wall time not yet turned into ticks
    pending: Duration,
}

impl GameSession {
    /// Session with the system clock, seeded from the config when it has a seed.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        GameSession::with_parts(config, rng, SystemClock)
    }
}

impl<S: RandomSource, C: Clock> GameSession<S, C> {
    pub fn with_parts(config: SimConfig, rng: S, clock: C) -> Self {
        Self {
            snapshot: GameSnapshot::default(),
            rng,
            clock,
            store: None,
            rules: config.rules(),
            config,
            pending: Duration::ZERO,
        }
    }

    /// Attach a persistence store for save, load and autosave.
    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    /// Swap in a transition result, or log and keep the old snapshot.
    fn commit(
        &mut self,
        action: &'static str,
        result: Result<GameSnapshot, Rejection>,
    ) -> Result<(), Rejection> {
        match result {
            Ok(next) => {
                self.snapshot = next;
                if self.config.autosave {
                    self.autosave();
                }
                Ok(())
            }
            Err(rejection) => {
                log::debug!("{action} rejected: {rejection}");
                Err(rejection)
            }
        }
    }

    fn autosave(&self) {
        let Some(store) = self.store.as_deref() else {
            return;
        };
        if let Err(e) = save_game_to(store, &self.config.save_key, &self.snapshot) {
            log::error!("autosave failed: {e}");
        }
    }

    pub fn new_game(&mut self, name: &str, career: Career) -> Result<(), Rejection> {
        let result = transitions::start_new_game(name, career);
        if let Ok(snapshot) = &result {
            log::info!(
                "new game for {} as {}",
                snapshot.player.name,
                career.profile().label
            );
        }
        self.pending = Duration::ZERO;
        self.commit("new_game", result)
    }

    /// Replace the current game with the saved one, if there is a usable save.
    pub fn load_game(&mut self) -> bool {
        let Some(store) = self.store.as_deref() else {
            return false;
        };
        match load_game_from(store, &self.config.save_key) {
            Some(snapshot) => {
                log::info!(
                    "loaded save for {} (day {}, hour {})",
                    snapshot.player.name,
                    snapshot.day,
                    snapshot.hour
                );
                self.snapshot = snapshot;
                self.pending = Duration::ZERO;
                true
            }
            None => false,
        }
    }

    /// Save now; a session without a store has nothing to do.
    pub fn save_game(&self) -> Result<(), SaveError> {
        match self.store.as_deref() {
            Some(store) => save_game_to(store, &self.config.save_key, &self.snapshot),
            None => Ok(()),
        }
    }

    pub fn create_content(
        &mut self,
        kind: ContentKind,
        title: &str,
    ) -> Result<ContentRoll, Rejection> {
        let now = self.clock.now();
        let result = transitions::create_content(&self.snapshot, kind, title, &mut self.rng, now);
        let (next, roll) = match result {
            Ok(published) => published,
            Err(rejection) => {
                log::debug!("create_content rejected: {rejection}");
                return Err(rejection);
            }
        };
        if roll.viral {
            log::info!("{} went viral with {} views", kind.label(), roll.views);
        }
        self.commit("create_content", Ok(next))?;
        Ok(roll)
    }

    pub fn practice_skill(&mut self, skill: Skill) -> Result<(), Rejection> {
        let result = transitions::practice_skill(&self.snapshot, skill);
        self.commit("practice_skill", result)?;
        log::debug!(
            "{} now at {}",
            skill.label(),
            self.snapshot.player.skills.level(skill)
        );
        Ok(())
    }

    pub fn purchase_equipment(&mut self, equipment_id: &str, price: i64) -> Result<(), Rejection> {
        let result = transitions::purchase_equipment(&self.snapshot, equipment_id, price);
        self.commit("purchase_equipment", result)
    }

    pub fn rest(&mut self) -> Result<(), Rejection> {
        let now = self.clock.now();
        let result = transitions::rest(&self.snapshot, &self.rules, &mut self.rng, now);
        self.commit("rest", result)
    }

    /// Advance the game clock one hour.
    pub fn tick(&mut self) -> Result<(), Rejection> {
        let now = self.clock.now();
        let result = transitions::advance_time(&self.snapshot, &self.rules, &mut self.rng, now);
        let before = self.snapshot.events.last().map(|e| e.id);
        self.commit("tick", result)?;
        if let Some(event) = self.snapshot.latest_event() {
            if Some(event.id) != before {
                log::info!("day {}: {}", self.snapshot.day, event.title);
            }
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), Rejection> {
        let result = transitions::set_paused(&self.snapshot, true);
        self.commit("pause", result)
    }

    pub fn resume(&mut self) -> Result<(), Rejection> {
        let result = transitions::set_paused(&self.snapshot, false);
        self.pending = Duration::ZERO;
        self.commit("resume", result)
    }

    /// Feed elapsed wall time; ticks once per full interval and returns the count.
    ///
    /// Time that passes while the game is not running is thrown away.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if self.phase() != Phase::Playing {
            self.pending = Duration::ZERO;
            return 0;
        }
        let interval = self.config.tick_interval();
        if interval.is_zero() {
            return 0;
        }
        self.pending += elapsed;
        let mut ticks = 0;
        while self.pending >= interval {
            self.pending -= interval;
            if self.tick().is_err() {
                self.pending = Duration::ZERO;
                break;
            }
            ticks += 1;
        }
        ticks
    }

    /// Export the current game with bincode.
    pub fn save_to<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        export_binary(&self.snapshot, writer)
    }

    /// Replace the current game with one read by [`GameSession::save_to`].
    pub fn load_from<Rd: Read>(&mut self, reader: Rd) -> Result<(), SaveError> {
        self.snapshot = import_binary(reader)?;
        self.pending = Duration::ZERO;
        Ok(())
    }
}

/// Lock a shared session, recovering the guard if a holder panicked.
pub fn lock_session<S, C>(session: &Mutex<GameSession<S, C>>) -> MutexGuard<'_, GameSession<S, C>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

pub type SharedSession<S = RngSource, C = SystemClock> = Arc<Mutex<GameSession<S, C>>>;

/// Identifier handed out by a [`SessionRegistry`].
pub type SessionId = u64;

/// Independent sessions, each behind its own lock.
pub struct SessionRegistry<S = RngSource, C = SystemClock> {
    sessions: BTreeMap<SessionId, SharedSession<S, C>>,
    next_id: SessionId,
}

impl<S, C> Default for SessionRegistry<S, C> {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<S, C> SessionRegistry<S, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: GameSession<S, C>) -> (SessionId, SharedSession<S, C>) {
        let id = self.next_id;
        self.next_id += 1;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id, Arc::clone(&shared));
        (id, shared)
    }

    pub fn get(&self, id: SessionId) -> Option<SharedSession<S, C>> {
        self.sessions.get(&id).cloned()
    }

    pub fn remove(&mut self, id: SessionId) -> Option<SharedSession<S, C>> {
        self.sessions.remove(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.sessions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError, SAVE_KEY};
    use chrono::TimeZone;
    use influencer_logic::dice::ScriptedSource;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap())
    }

    fn scripted(values: &[f64]) -> GameSession<ScriptedSource, FixedClock> {
        GameSession::with_parts(
            SimConfig::default(),
            ScriptedSource::new(values.iter().copied()),
            clock(),
        )
    }

    /// Store whose writes always fail.
    #[derive(Default)]
    struct BrokenStore {
        attempts: AtomicUsize,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("disk full".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_rejection_keeps_snapshot() {
        let mut session = scripted(&[0.5]);
        assert_eq!(session.tick(), Err(Rejection::NotStarted));
        assert_eq!(session.snapshot(), &GameSnapshot::default());
        session.new_game("Ana", Career::Streamer).unwrap();
        let before = session.snapshot().clone();
        assert_eq!(
            session.practice_skill(Skill::Makeup),
            Err(Rejection::SkillNotInCareer)
        );
        assert_eq!(session.snapshot(), &before);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut session = scripted(&[]);
        assert_eq!(session.new_game("  ", Career::Model), Err(Rejection::EmptyName));
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_content_uses_clock() {
        let mut session = scripted(&[0.5, 0.0, 0.0, 0.53]);
        session.new_game("Ana", Career::Streamer).unwrap();
        let roll = session
            .create_content(ContentKind::VideoStream, "Launch")
            .unwrap();
        assert!(roll.viral);
        assert_eq!(session.snapshot().viral_videos[0].timestamp, clock().0);
    }

    #[test]
    fn test_autosave_after_each_action() {
        let mut session = scripted(&[0.9]).with_store(MemoryStore::new());
        session.new_game("Ana", Career::Fitness).unwrap();
        session.tick().unwrap();
        let store = session.store().unwrap();
        let saved = crate::persistence::load_game(store).unwrap();
        assert_eq!(&saved, session.snapshot());
    }

    #[test]
    fn test_autosave_disabled() {
        let config = SimConfig {
            autosave: false,
            ..SimConfig::default()
        };
        let mut session = GameSession::with_parts(config, ScriptedSource::default(), clock())
            .with_store(MemoryStore::new());
        session.new_game("Ana", Career::Fitness).unwrap();
        assert!(!crate::persistence::has_save(session.store().unwrap()));
        session.save_game().unwrap();
        assert!(crate::persistence::has_save(session.store().unwrap()));
    }

    #[test]
    fn test_failed_autosave_keeps_new_state() {
        let mut session = scripted(&[0.9]).with_store(BrokenStore::default());
        session.new_game("Ana", Career::Model).unwrap();
        session.tick().unwrap();
        assert_eq!(session.snapshot().hour, 9);
        assert!(session.save_game().is_err());
    }

    #[test]
    fn test_load_game_from_store() {
        let store = MemoryStore::new();
        let mut saved = GameSnapshot::new_game("Bo", Career::Journalist);
        saved.day = 12;
        crate::persistence::save_game(&store, &saved).unwrap();

        let mut session = scripted(&[]).with_store(store);
        assert!(session.load_game());
        assert_eq!(session.snapshot(), &saved);
    }

    #[test]
    fn test_load_game_ignores_garbage() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY, "garbage").unwrap();
        let mut session = scripted(&[]).with_store(store);
        assert!(!session.load_game());
        assert_eq!(session.phase(), Phase::NotStarted);

        let mut bare = scripted(&[]);
        assert!(!bare.load_game());
    }

    #[test]
    fn test_update_accumulates_wall_time() {
        let config = SimConfig {
            tick_seconds: 1.0,
            ..SimConfig::default()
        };
        let mut session = GameSession::with_parts(config, ScriptedSource::new([0.9]), clock());
        session.new_game("Ana", Career::Musician).unwrap();
        assert_eq!(session.update(Duration::from_millis(600)), 0);
        assert_eq!(session.update(Duration::from_millis(600)), 1);
        assert_eq!(session.update(Duration::from_millis(2_900)), 3);
        assert_eq!(session.snapshot().hour, 12);
    }

    #[test]
    fn test_update_discards_time_while_paused() {
        let config = SimConfig {
            tick_seconds: 1.0,
            ..SimConfig::default()
        };
        let mut session = GameSession::with_parts(config, ScriptedSource::new([0.9]), clock());
        assert_eq!(session.update(Duration::from_secs(5)), 0);
        session.new_game("Ana", Career::Musician).unwrap();
        session.pause().unwrap();
        assert_eq!(session.update(Duration::from_secs(5)), 0);
        assert_eq!(session.tick(), Err(Rejection::Paused));
        session.resume().unwrap();
        assert_eq!(session.update(Duration::from_millis(500)), 0);
        assert_eq!(session.snapshot().hour, 8);
    }

    #[test]
    fn test_update_with_zero_tick_seconds_terminates() {
        let config = SimConfig {
            tick_seconds: 0.0,
            autosave: false,
            ..SimConfig::default()
        };
        let mut session = GameSession::with_parts(config, ScriptedSource::new([0.9]), clock());
        session.new_game("Ana", Career::Musician).unwrap();
        assert_eq!(session.update(Duration::from_secs(1)), 0);
        assert_eq!(session.update(Duration::from_secs(30)), 1);
        assert_eq!(session.snapshot().hour, 9);
    }

    #[test]
    fn test_load_from_oversized_save_keeps_game() {
        let mut session = scripted(&[0.9]);
        session.new_game("Ana", Career::Beauty).unwrap();
        let before = session.snapshot().clone();
        let result = session.load_from(Cursor::new(vec![0xffu8; 8]));
        assert!(matches!(result, Err(SaveError::TooLarge)));
        assert_eq!(session.snapshot(), &before);
    }

    #[test]
    fn test_binary_save_and_load() {
        let mut session = scripted(&[0.9]);
        session.new_game("Ana", Career::Beauty).unwrap();
        session.tick().unwrap();
        let mut buffer = Vec::new();
        session.save_to(&mut buffer).unwrap();

        let mut other = scripted(&[]);
        other.load_from(Cursor::new(buffer)).unwrap();
        assert_eq!(other.snapshot(), session.snapshot());
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let config = SimConfig {
            seed: Some(99),
            ..SimConfig::default()
        };
        let play = |config: SimConfig| {
            let mut session = GameSession::new(config);
            session.new_game("Ana", Career::Storyteller).unwrap();
            for _ in 0..60 {
                let _ = session.tick();
                let _ = session.create_content(ContentKind::Story, "Chapter");
                let _ = session.rest();
            }
            let mut snapshot = session.snapshot().clone();
            // wall-clock stamps differ between runs
            for event in &mut snapshot.events {
                event.timestamp = clock().0;
            }
            for video in &mut snapshot.viral_videos {
                video.timestamp = clock().0;
            }
            snapshot
        };
        assert_eq!(play(config.clone()), play(config));
    }

    #[test]
    fn test_registry_sessions_are_independent() {
        let mut registry = SessionRegistry::new();
        let (a, first) = registry.insert(scripted(&[0.9]));
        let (b, _) = registry.insert(scripted(&[0.9]));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);

        lock_session(&first).new_game("Ana", Career::Model).unwrap();
        lock_session(&first).tick().unwrap();

        let second = registry.get(b).unwrap();
        assert_eq!(lock_session(&second).phase(), Phase::NotStarted);
        assert_eq!(lock_session(&first).snapshot().hour, 9);

        assert!(registry.remove(a).is_some());
        assert!(registry.get(a).is_none());
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![b]);
    }
}
