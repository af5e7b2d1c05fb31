//! Random overnight events.
//!
//! Events come from a fixed catalog of five templates. When a day begins
//! there is a chance one of them fires; its effects hit the player's stats
//! immediately and the event is kept in a short log.

use chrono::{DateTime, Utc};
use influencer_logic::dice::RandomSource;
use influencer_logic::stats::StatEffects;

use crate::snapshot::{Event, EventKind};

/// Chance that a new day starts with an event.
pub const DAILY_EVENT_CHANCE: f64 = 0.3;

/// Static description of one kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTemplate {
    pub kind: EventKind,
    pub title: &'static str,
    pub description: &'static str,
    pub effects: StatEffects,
}

impl EventTemplate {
    pub fn instantiate(&self, id: u64, timestamp: DateTime<Utc>) -> Event {
        Event {
            id,
            kind: self.kind,
            title: self.title.to_string(),
            description: self.description.to_string(),
            effects: self.effects,
            timestamp,
        }
    }
}

const NO_EFFECTS: StatEffects = StatEffects {
    followers: None,
    money: None,
    happiness: None,
    energy: None,
    reputation: None,
};

/// Template catalog; picks are uniform over this order.
pub const EVENT_TEMPLATES: [EventTemplate; 5] = [
    EventTemplate {
        kind: EventKind::Opportunity,
        title: "Collaboration Offer",
        description: "A bigger influencer wants to collaborate with you",
        effects: StatEffects {
            followers: Some(50),
            reputation: Some(10),
            ..NO_EFFECTS
        },
    },
    EventTemplate {
        kind: EventKind::TechnicalProblem,
        title: "Technical Problem",
        description: "Your gear failed during an important stream",
        effects: StatEffects {
            happiness: Some(-15),
            reputation: Some(-5),
            ..NO_EFFECTS
        },
    },
    EventTemplate {
        kind: EventKind::Viral,
        title: "Unexpected Viral Moment",
        description: "One of your old videos suddenly went viral",
        effects: StatEffects {
            followers: Some(200),
            money: Some(100),
            happiness: Some(20),
            ..NO_EFFECTS
        },
    },
    EventTemplate {
        kind: EventKind::Harassment,
        title: "Negative Comments",
        description: "You received a wave of negative comments",
        effects: StatEffects {
            happiness: Some(-20),
            energy: Some(-10),
            ..NO_EFFECTS
        },
    },
    EventTemplate {
        kind: EventKind::Cancellation,
        title: "Minor Controversy",
        description: "One of your comments was taken out of context",
        effects: StatEffects {
            followers: Some(-30),
            reputation: Some(-15),
            happiness: Some(-10),
            ..NO_EFFECTS
        },
    },
];

pub fn template_for(kind: EventKind) -> &'static EventTemplate {
    match kind {
        EventKind::Opportunity => &EVENT_TEMPLATES[0],
        EventKind::TechnicalProblem => &EVENT_TEMPLATES[1],
        EventKind::Viral => &EVENT_TEMPLATES[2],
        EventKind::Harassment => &EVENT_TEMPLATES[3],
        EventKind::Cancellation => &EVENT_TEMPLATES[4],
    }
}

/// Pick a template uniformly and stamp it with an id and time.
pub fn generate_random_event(
    rng: &mut impl RandomSource,
    id: u64,
    now: DateTime<Utc>,
) -> Event {
    EVENT_TEMPLATES[rng.pick(EVENT_TEMPLATES.len())].instantiate(id, now)
}

/// Roll the daily chance; `None` on a quiet night.
pub fn maybe_generate_event(
    rng: &mut impl RandomSource,
    chance: f64,
    id: u64,
    now: DateTime<Utc>,
) -> Option<Event> {
    if rng.chance(chance) {
        Some(generate_random_event(rng, id, now))
    } else {
        None
    }
}

/// Append to a log, dropping the oldest entries beyond `cap`.
pub fn push_capped(log: &mut Vec<Event>, event: Event, cap: usize) {
    log.push(event);
    if log.len() > cap {
        let excess = log.len() - cap;
        log.drain(..excess);
    }
}
