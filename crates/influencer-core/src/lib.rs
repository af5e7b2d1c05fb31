//! Influencer X Core - Life Simulation Engine
//!
//! Game state and the rules that move it forward for a single-player
//! influencer life sim: pick a career, publish content, practice skills,
//! buy gear, rest, and watch the clock tick toward the next day's surprise.
//!
//! # Architecture
//!
//! - **Snapshot**: one plain, serializable value holding the whole game
//! - **Transitions**: pure functions from a snapshot to the next snapshot,
//!   or a rejection that leaves the game untouched
//! - **Session**: owns the snapshot, the dice, the clock and the save slot
//! - **Ticker**: background thread that advances a shared session
//!
//! The formulas themselves live in `influencer-logic`.
//!
//! # Example
//!
//! ```rust
//! use influencer_core::prelude::*;
//!
//! let mut session = GameSession::new(SimConfig::default()).with_store(MemoryStore::new());
//! session.new_game("Ana", Career::Streamer).unwrap();
//! session.practice_skill(Skill::Gaming).unwrap();
//! session.tick().unwrap();
//!
//! assert_eq!(session.snapshot().hour, 9);
//! assert!(persistence::has_save(session.store().unwrap()));
//! ```

pub mod config;
pub mod events;
pub mod persistence;
pub mod session;
pub mod snapshot;
pub mod ticker;
pub mod transitions;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::persistence::{self, DirStore, KeyValueStore, MemoryStore, MiniGame};
    pub use crate::session::{Clock, FixedClock, GameSession, SessionRegistry, SystemClock};
    pub use crate::snapshot::{Event, EventKind, GameSnapshot, Phase};
    pub use crate::ticker::Ticker;
    pub use crate::transitions::Rejection;
    pub use influencer_logic::careers::{Career, ContentKind, Skill};
    pub use influencer_logic::dice::{RandomSource, RngSource, ScriptedSource};
}
