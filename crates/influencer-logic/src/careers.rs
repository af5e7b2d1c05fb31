//! Careers, content kinds and skills.
//!
//! The mapping career → {content kinds, skills} and content kind → skill
//! pair lives in one static table so nothing else has to branch on career.
//! Wire names are stable strings (`"video-stream"`, `"crazy-stuff"`,
//! `"public_speaking"`) and parse back through `FromStr`; unknown strings
//! are an error, never a silent default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unknown career, content kind or skill name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Every trainable skill across all careers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Model
    Attractiveness,
    Posing,
    FashionKnowledge,
    // Streamer
    Gaming,
    Charisma,
    GameKnowledge,
    // Musician
    Musicianship,
    Composition,
    MusicMarketing,
    // Storyteller
    Creativity,
    Writing,
    Empathy,
    // Fitness
    Strength,
    FitnessKnowledge,
    Motivation,
    // Beauty
    Makeup,
    PersonalStyle,
    // Crazy stuff
    Bravery,
    ChallengeCreativity,
    Humor,
    // Journalist
    Research,
    PublicSpeaking,
    Credibility,
    Ethics,
}

impl Skill {
    pub const ALL: [Skill; 24] = [
        Skill::Attractiveness,
        Skill::Posing,
        Skill::FashionKnowledge,
        Skill::Gaming,
        Skill::Charisma,
        Skill::GameKnowledge,
        Skill::Musicianship,
        Skill::Composition,
        Skill::MusicMarketing,
        Skill::Creativity,
        Skill::Writing,
        Skill::Empathy,
        Skill::Strength,
        Skill::FitnessKnowledge,
        Skill::Motivation,
        Skill::Makeup,
        Skill::PersonalStyle,
        Skill::Bravery,
        Skill::ChallengeCreativity,
        Skill::Humor,
        Skill::Research,
        Skill::PublicSpeaking,
        Skill::Credibility,
        Skill::Ethics,
    ];

    /// Stable identifier used on the wire and in saves.
    pub fn as_str(self) -> &'static str {
        match self {
            Skill::Attractiveness => "attractiveness",
            Skill::Posing => "posing",
            Skill::FashionKnowledge => "fashion_knowledge",
            Skill::Gaming => "gaming",
            Skill::Charisma => "charisma",
            Skill::GameKnowledge => "game_knowledge",
            Skill::Musicianship => "musicianship",
            Skill::Composition => "composition",
            Skill::MusicMarketing => "music_marketing",
            Skill::Creativity => "creativity",
            Skill::Writing => "writing",
            Skill::Empathy => "empathy",
            Skill::Strength => "strength",
            Skill::FitnessKnowledge => "fitness_knowledge",
            Skill::Motivation => "motivation",
            Skill::Makeup => "makeup",
            Skill::PersonalStyle => "personal_style",
            Skill::Bravery => "bravery",
            Skill::ChallengeCreativity => "challenge_creativity",
            Skill::Humor => "humor",
            Skill::Research => "research",
            Skill::PublicSpeaking => "public_speaking",
            Skill::Credibility => "credibility",
            Skill::Ethics => "ethics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Skill::Attractiveness => "Attractiveness",
            Skill::Posing => "Posing",
            Skill::FashionKnowledge => "Fashion Knowledge",
            Skill::Gaming => "Gaming",
            Skill::Charisma => "Charisma",
            Skill::GameKnowledge => "Game Knowledge",
            Skill::Musicianship => "Musicianship",
            Skill::Composition => "Composition",
            Skill::MusicMarketing => "Music Marketing",
            Skill::Creativity => "Creativity",
            Skill::Writing => "Writing",
            Skill::Empathy => "Empathy",
            Skill::Strength => "Strength",
            Skill::FitnessKnowledge => "Fitness Knowledge",
            Skill::Motivation => "Motivation",
            Skill::Makeup => "Makeup",
            Skill::PersonalStyle => "Personal Style",
            Skill::Bravery => "Bravery",
            Skill::ChallengeCreativity => "Challenge Creativity",
            Skill::Humor => "Sense of Humor",
            Skill::Research => "Research",
            Skill::PublicSpeaking => "Public Speaking",
            Skill::Credibility => "Credibility",
            Skill::Ethics => "Ethics",
        }
    }
}

/// Kinds of content a player can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    FashionPhoto,
    VideoStream,
    Song,
    Story,
    WorkoutRoutine,
    BeautyTutorial,
    CrazyChallenge,
    News,
}

impl ContentKind {
    pub const ALL: [ContentKind; 8] = [
        ContentKind::FashionPhoto,
        ContentKind::VideoStream,
        ContentKind::Song,
        ContentKind::Story,
        ContentKind::WorkoutRoutine,
        ContentKind::BeautyTutorial,
        ContentKind::CrazyChallenge,
        ContentKind::News,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::FashionPhoto => "fashion-photo",
            ContentKind::VideoStream => "video-stream",
            ContentKind::Song => "song",
            ContentKind::Story => "story",
            ContentKind::WorkoutRoutine => "workout-routine",
            ContentKind::BeautyTutorial => "beauty-tutorial",
            ContentKind::CrazyChallenge => "crazy-challenge",
            ContentKind::News => "news",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::FashionPhoto => "Fashion Photo",
            ContentKind::VideoStream => "Video/Stream",
            ContentKind::Song => "Song",
            ContentKind::Story => "Story",
            ContentKind::WorkoutRoutine => "Workout Routine",
            ContentKind::BeautyTutorial => "Beauty Tutorial",
            ContentKind::CrazyChallenge => "Crazy Challenge",
            ContentKind::News => "News Article",
        }
    }

    /// The two skills that drive this kind's quality.
    pub fn skills(self) -> [Skill; 2] {
        match self {
            ContentKind::FashionPhoto => [Skill::Attractiveness, Skill::Posing],
            ContentKind::VideoStream => [Skill::Gaming, Skill::Charisma],
            ContentKind::Song => [Skill::Musicianship, Skill::Composition],
            ContentKind::Story => [Skill::Creativity, Skill::Writing],
            ContentKind::WorkoutRoutine => [Skill::Strength, Skill::FitnessKnowledge],
            ContentKind::BeautyTutorial => [Skill::Makeup, Skill::PersonalStyle],
            ContentKind::CrazyChallenge => [Skill::Bravery, Skill::ChallengeCreativity],
            ContentKind::News => [Skill::Research, Skill::PublicSpeaking],
        }
    }
}

/// Player specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Career {
    Model,
    Streamer,
    Musician,
    Storyteller,
    Fitness,
    Beauty,
    CrazyStuff,
    Journalist,
}

/// Static description of a career: what it publishes and what it trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareerProfile {
    pub career: Career,
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub content_kinds: &'static [ContentKind],
    pub skills: &'static [Skill],
}

/// One row per career, in `Career` declaration order.
pub const CAREERS: [CareerProfile; 8] = [
    CareerProfile {
        career: Career::Model,
        id: "model",
        label: "Fashion Model",
        description: "Specialize in fashion, aesthetics and poses for social media",
        content_kinds: &[ContentKind::FashionPhoto, ContentKind::VideoStream],
        skills: &[Skill::Attractiveness, Skill::Posing, Skill::FashionKnowledge],
    },
    CareerProfile {
        career: Career::Streamer,
        id: "streamer",
        label: "Streamer",
        description: "Stream video games and entertain a live audience",
        content_kinds: &[ContentKind::VideoStream, ContentKind::CrazyChallenge],
        skills: &[Skill::Gaming, Skill::Charisma, Skill::GameKnowledge],
    },
    CareerProfile {
        career: Career::Musician,
        id: "musician",
        label: "Musician",
        description: "Write and share original music to win followers",
        content_kinds: &[ContentKind::Song, ContentKind::VideoStream],
        skills: &[Skill::Musicianship, Skill::Composition, Skill::MusicMarketing],
    },
    CareerProfile {
        career: Career::Storyteller,
        id: "storyteller",
        label: "Storyteller",
        description: "Tell captivating stories and connect emotionally",
        content_kinds: &[ContentKind::Story, ContentKind::VideoStream],
        skills: &[Skill::Creativity, Skill::Writing, Skill::Empathy],
    },
    CareerProfile {
        career: Career::Fitness,
        id: "fitness",
        label: "Fitness Influencer",
        description: "Inspire with workout routines and health tips",
        content_kinds: &[ContentKind::WorkoutRoutine, ContentKind::VideoStream],
        skills: &[Skill::Strength, Skill::FitnessKnowledge, Skill::Motivation],
    },
    CareerProfile {
        career: Career::Beauty,
        id: "beauty",
        label: "Beauty Influencer",
        description: "Share makeup tutorials and self-care routines",
        content_kinds: &[ContentKind::BeautyTutorial, ContentKind::FashionPhoto],
        skills: &[Skill::Makeup, Skill::PersonalStyle],
    },
    CareerProfile {
        career: Career::CrazyStuff,
        id: "crazy-stuff",
        label: "Crazy Content",
        description: "Take on extreme challenges and funny viral content",
        content_kinds: &[ContentKind::CrazyChallenge, ContentKind::VideoStream],
        skills: &[Skill::Bravery, Skill::ChallengeCreativity, Skill::Humor],
    },
    CareerProfile {
        career: Career::Journalist,
        id: "journalist",
        label: "Digital Journalist",
        description: "Investigate and share news and controversies",
        content_kinds: &[ContentKind::News, ContentKind::VideoStream],
        skills: &[
            Skill::Research,
            Skill::PublicSpeaking,
            Skill::Credibility,
            Skill::Ethics,
        ],
    },
];

impl Career {
    pub const ALL: [Career; 8] = [
        Career::Model,
        Career::Streamer,
        Career::Musician,
        Career::Storyteller,
        Career::Fitness,
        Career::Beauty,
        Career::CrazyStuff,
        Career::Journalist,
    ];

    pub fn profile(self) -> &'static CareerProfile {
        &CAREERS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.profile().id
    }

    pub fn can_create(self, kind: ContentKind) -> bool {
        self.profile().content_kinds.contains(&kind)
    }

    pub fn can_practice(self, skill: Skill) -> bool {
        self.profile().skills.contains(&skill)
    }
}

/// Content kinds open to a player; a player without a career sees all.
pub fn content_kinds_for(career: Option<Career>) -> &'static [ContentKind] {
    match career {
        Some(c) => c.profile().content_kinds,
        None => &ContentKind::ALL,
    }
}

/// Skills a player can train; none without a career.
pub fn skills_for(career: Option<Career>) -> &'static [Skill] {
    match career {
        Some(c) => c.profile().skills,
        None => &[],
    }
}

fn parse_from<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, ParseError> {
    let needle = value.trim();
    all.iter()
        .copied()
        .find(|item| name(*item) == needle)
        .ok_or_else(|| ParseError {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for Skill {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("skill", s, &Skill::ALL, Skill::as_str)
    }
}

impl FromStr for ContentKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("content kind", s, &ContentKind::ALL, ContentKind::as_str)
    }
}

impl FromStr for Career {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("career", s, &Career::ALL, Career::as_str)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
