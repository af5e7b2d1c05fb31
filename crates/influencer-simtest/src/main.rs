//! Influencer X Headless Simulation Harness
//!
//! Validates the formula tables and plays scripted games through the state
//! container. Runs entirely in-process: memory store, frozen clock, seeded
//! dice, no rendering.
//!
//! Usage:
//!   cargo run -p influencer-simtest
//!   cargo run -p influencer-simtest -- --verbose
//!   cargo run -p influencer-simtest -- --seed 7 --days 30

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use influencer_core::events::EVENT_TEMPLATES;
use influencer_core::persistence::{self, MemoryStore, MiniGame};
use influencer_core::prelude::*;
use influencer_logic::careers::CAREERS;
use influencer_logic::content::{content_quality, viral_probability, MAX_VIRAL_PROBABILITY};
use influencer_logic::equipment::{available_equipment, CATALOG, STARTER_PHONE};
use influencer_logic::progression::{experience_required, level_for_experience};
use influencer_logic::skills::{next_level, practice_cost, SkillSet};
use std::collections::HashSet;
use std::time::Duration;

// ── Harness config (same shape a session reads) ─────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/simtest.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: u64,
    days: u32,
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_options(config: &SimConfig) -> Options {
    let args: Vec<String> = std::env::args().collect();
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: arg_value(&args, "--seed")
            .and_then(|v| v.parse().ok())
            .or(config.seed)
            .unwrap_or(42),
        days: arg_value(&args, "--days")
            .and_then(|v| v.parse().ok())
            .unwrap_or(14),
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn main() {
    println!("=== Influencer X Simulation Harness ===\n");

    let config = match SimConfig::from_json_str(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ config_parse: {}", e);
            std::process::exit(1);
        }
    };
    let options = parse_options(&config);
    if options.verbose {
        println!(
            "seed={} days={} tick={:?}\n",
            options.seed,
            options.days,
            config.tick_interval()
        );
    }

    let mut results = Vec::new();

    // 1. Career / content / skill table
    results.extend(validate_career_table(options.verbose));

    // 2. Formula sweeps
    results.extend(validate_formulas(options.verbose));

    // 3. Shop and events
    results.extend(validate_catalogs(options.verbose));

    // 4. Seeded playthrough
    results.extend(validate_playthrough(&config, &options));

    // 5. Save / load
    results.extend(validate_persistence(&config, &options));

    // 6. Determinism
    results.extend(validate_determinism(&config, &options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Career table ─────────────────────────────────────────────────────

fn validate_career_table(verbose: bool) -> Vec<TestResult> {
    println!("--- Career Table ---");
    let mut results = Vec::new();

    let ordered = CAREERS
        .iter()
        .enumerate()
        .all(|(i, p)| p.career as usize == i && p.career.as_str() == p.id);
    results.push(TestResult {
        name: "careers_indexed".into(),
        passed: ordered && CAREERS.len() == Career::ALL.len(),
        detail: format!("{} careers", CAREERS.len()),
    });

    let roundtrip: Vec<_> = Career::ALL
        .iter()
        .filter(|c| c.as_str().parse::<Career>().ok() != Some(**c))
        .collect();
    results.push(TestResult {
        name: "careers_parse_back".into(),
        passed: roundtrip.is_empty(),
        detail: if roundtrip.is_empty() {
            "every career id parses back".into()
        } else {
            format!("{} ids do not parse back", roundtrip.len())
        },
    });

    let orphan_kinds: Vec<_> = ContentKind::ALL
        .iter()
        .filter(|k| !Career::ALL.iter().any(|c| c.can_create(**k)))
        .map(|k| k.as_str())
        .collect();
    results.push(TestResult {
        name: "content_kinds_reachable".into(),
        passed: orphan_kinds.is_empty(),
        detail: if orphan_kinds.is_empty() {
            "every content kind has a career".into()
        } else {
            format!("orphan kinds: {}", orphan_kinds.join(", "))
        },
    });

    let orphan_skills: Vec<_> = Skill::ALL
        .iter()
        .filter(|s| !Career::ALL.iter().any(|c| c.can_practice(**s)))
        .map(|s| s.as_str())
        .collect();
    results.push(TestResult {
        name: "skills_reachable".into(),
        passed: orphan_skills.is_empty(),
        detail: if orphan_skills.is_empty() {
            format!("{} skills, all trainable", Skill::ALL.len())
        } else {
            format!("orphan skills: {}", orphan_skills.join(", "))
        },
    });

    let unknown_rejected = "influencer".parse::<Career>().is_err()
        && "podcast".parse::<ContentKind>().is_err()
        && "juggling".parse::<Skill>().is_err();
    results.push(TestResult {
        name: "unknown_names_rejected".into(),
        passed: unknown_rejected,
        detail: "unknown career/content/skill strings fail to parse".into(),
    });

    if verbose {
        for profile in &CAREERS {
            println!(
                "  {:<12} kinds={} skills={}",
                profile.id,
                profile.content_kinds.len(),
                profile.skills.len()
            );
        }
    }

    results
}

// ── 2. Formulas ─────────────────────────────────────────────────────────

fn validate_formulas(verbose: bool) -> Vec<TestResult> {
    println!("--- Formulas ---");
    let mut results = Vec::new();

    // Quality sweep over skill pairs and gear
    let mut rng = RngSource::seeded(1);
    let mut out_of_range = 0;
    let mut histogram = [0u32; 11];
    for _ in 0..2_000 {
        let kind = ContentKind::ALL[rng.pick(ContentKind::ALL.len())];
        let [a, b] = kind.skills();
        let skills: SkillSet = [
            (a, rng.random_f64(0.0, 7.0) as f32),
            (b, rng.random_f64(0.0, 7.0) as f32),
        ]
        .into_iter()
        .collect();
        let gear: Vec<_> = CATALOG
            .iter()
            .filter(|_| rng.chance(0.3))
            .map(|c| c.to_equipment())
            .collect();
        let q = content_quality(&skills, &gear, kind);
        if (1..=10).contains(&q) {
            histogram[q as usize] += 1;
        } else {
            out_of_range += 1;
        }
    }
    results.push(TestResult {
        name: "quality_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("2000 samples, {} out of [1, 10]", out_of_range),
    });

    let empty = content_quality(&SkillSet::default(), &[], ContentKind::News);
    results.push(TestResult {
        name: "quality_floor".into(),
        passed: empty == 1,
        detail: format!("no skills, no gear -> {}", empty),
    });

    let monotonic = (1..10u8).all(|q| viral_probability(q) <= viral_probability(q + 1));
    let capped = (0..=255u8).all(|q| viral_probability(q) <= MAX_VIRAL_PROBABILITY);
    results.push(TestResult {
        name: "viral_probability_shape".into(),
        passed: monotonic && capped,
        detail: format!(
            "p(1)={:.3} p(10)={:.3} cap={}",
            viral_probability(1),
            viral_probability(10),
            MAX_VIRAL_PROBABILITY
        ),
    });

    // Practice ladder from zero to the cap
    let mut level = 0.0f32;
    let mut sessions = 0;
    let mut energy = 0;
    let mut money = 0;
    while level < 7.0 && sessions < 100 {
        let cost = practice_cost(level);
        energy += cost.energy;
        money += cost.money;
        level = next_level(level);
        sessions += 1;
    }
    results.push(TestResult {
        name: "practice_ladder".into(),
        passed: level == 7.0 && sessions == 26,
        detail: format!(
            "{} sessions to 7.0, {} energy, {} money",
            sessions, energy, money
        ),
    });

    let thresholds_ok = (1..=20u32).all(|l| {
        let xp = experience_required(l);
        level_for_experience(xp - 1, l) == l && level_for_experience(xp, l) == l + 1
    });
    results.push(TestResult {
        name: "experience_thresholds".into(),
        passed: thresholds_ok,
        detail: format!(
            "level 1 -> 2 at {} xp, 10 -> 11 at {} xp",
            experience_required(1),
            experience_required(10)
        ),
    });

    if verbose {
        println!("  quality histogram: {:?}", &histogram[1..]);
    }

    results
}

// ── 3. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs(_verbose: bool) -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    let ids: HashSet<&str> = CATALOG.iter().map(|c| c.id).collect();
    results.push(TestResult {
        name: "catalog_unique_ids".into(),
        passed: ids.len() == CATALOG.len() && !ids.contains(STARTER_PHONE.id),
        detail: format!("{} purchasable items", CATALOG.len()),
    });

    let valid = CATALOG
        .iter()
        .all(|c| (1..=10).contains(&c.quality) && c.price > 0 && c.level_required >= 1);
    results.push(TestResult {
        name: "catalog_valid_rows".into(),
        passed: valid,
        detail: "quality in [1, 10], positive price, level >= 1".into(),
    });

    let shop: Vec<usize> = (1..=5).map(|l| available_equipment(l, i64::MAX).len()).collect();
    results.push(TestResult {
        name: "shop_grows_with_level".into(),
        passed: shop.windows(2).all(|w| w[0] <= w[1]) && shop[4] == CATALOG.len(),
        detail: format!("items at levels 1-5: {:?}", shop),
    });

    let kinds: HashSet<EventKind> = EVENT_TEMPLATES.iter().map(|t| t.kind).collect();
    let balanced = EVENT_TEMPLATES.iter().all(|t| {
        let all_gains = t.effects.iter().all(|(_, d)| d > 0);
        !t.effects.is_empty() && t.kind.is_positive() == all_gains
    });
    results.push(TestResult {
        name: "event_templates".into(),
        passed: kinds.len() == EVENT_TEMPLATES.len() && balanced,
        detail: format!("{} templates, effects match their sign", EVENT_TEMPLATES.len()),
    });

    results
}

// ── 4. Playthrough ──────────────────────────────────────────────────────

#[derive(Default)]
struct PlayStats {
    accepted: u32,
    rejected: u32,
    viral: u32,
    purchases: u32,
    violations: Vec<String>,
}

/// Play every career for `days` in-game days with a simple greedy policy.
fn play_career(
    config: &SimConfig,
    career: Career,
    seed: u64,
    days: u32,
) -> (GameSnapshot, PlayStats) {
    let mut session = GameSession::with_parts(
        config.clone(),
        RngSource::seeded(seed),
        FixedClock(epoch()),
    )
    .with_store(MemoryStore::new());
    let mut stats = PlayStats::default();

    if let Err(e) = session.new_game("Ana", career) {
        stats.violations.push(format!("new_game: {}", e));
        return (session.snapshot().clone(), stats);
    }

    let profile = career.profile();
    let target_day = 1 + days;
    let mut step = 0usize;
    while session.snapshot().day < target_day && step < 10_000 {
        let snapshot = session.snapshot().clone();
        let energy = snapshot.player.stats.energy;
        let affordable = available_equipment(snapshot.player.level, snapshot.player.stats.money);
        let outcome = if energy < 20 {
            session.rest()
        } else if let Some(item) = affordable.into_iter().find(|e| !snapshot.room.owns(&e.id)) {
            let result = session.purchase_equipment(&item.id, item.price);
            if result.is_ok() {
                stats.purchases += 1;
            }
            result
        } else if step % 3 == 0 {
            let skill = profile.skills[step % profile.skills.len()];
            session.practice_skill(skill)
        } else {
            let kind = profile.content_kinds[step % profile.content_kinds.len()];
            match session.create_content(kind, &format!("Upload #{}", step)) {
                Ok(roll) => {
                    if roll.viral {
                        stats.viral += 1;
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        };

        match outcome {
            Ok(()) => stats.accepted += 1,
            Err(_) => stats.rejected += 1,
        }

        // Wall time passes between actions
        session.update(config.tick_interval());
        session.clock_mut().advance(ChronoDuration::minutes(20));

        if let Err(v) = session.snapshot().check_invariants() {
            stats
                .violations
                .push(format!("step {} day {}: {}", step, session.snapshot().day, v));
        }
        step += 1;
    }

    let saved = session.store().and_then(persistence::load_game);
    if saved.as_ref() != Some(session.snapshot()) {
        stats.violations.push("autosave out of date".into());
    }

    (session.snapshot().clone(), stats)
}

fn validate_playthrough(config: &SimConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Playthrough ---");
    let mut results = Vec::new();

    for (i, career) in Career::ALL.iter().enumerate() {
        let (snapshot, stats) = play_career(config, *career, options.seed + i as u64, options.days);
        let reached = snapshot.day >= 1 + options.days;
        results.push(TestResult {
            name: format!("play_{}", career.as_str()),
            passed: stats.violations.is_empty() && reached,
            detail: if stats.violations.is_empty() {
                format!(
                    "day {} level {} followers {} money {} | \
                     {} ok, {} rejected, {} viral, {} bought",
                    snapshot.day,
                    snapshot.player.level,
                    snapshot.player.stats.followers,
                    snapshot.player.stats.money,
                    stats.accepted,
                    stats.rejected,
                    stats.viral,
                    stats.purchases
                )
            } else {
                format!(
                    "{} violations, first: {}",
                    stats.violations.len(),
                    stats.violations[0]
                )
            },
        });

        if options.verbose {
            for event in &snapshot.events {
                println!("  [{}] {} ({:?})", career.as_str(), event.title, event.kind);
            }
        }
    }

    // Paused sessions hold still
    let mut session = GameSession::with_parts(
        config.clone(),
        RngSource::seeded(options.seed),
        FixedClock(epoch()),
    );
    let _ = session.new_game("Ana", Career::Streamer);
    let _ = session.pause();
    let ticks = session.update(Duration::from_secs(3600));
    let before = (session.snapshot().day, session.snapshot().hour);
    let rejected = session.rest().is_err();
    results.push(TestResult {
        name: "pause_freezes_clock".into(),
        passed: ticks == 0 && rejected && before == (1, 8),
        detail: format!(
            "{} ticks while paused, clock at day {} hour {}",
            ticks, before.0, before.1
        ),
    });

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &SimConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let (snapshot, _) = play_career(config, Career::Streamer, options.seed, options.days);

    let store = MemoryStore::new();
    let json_ok = persistence::save_game(&store, &snapshot).is_ok()
        && persistence::load_game(&store).as_ref() == Some(&snapshot);
    let size = serde_json::to_string(&snapshot).map(|s| s.len()).unwrap_or(0);
    results.push(TestResult {
        name: "json_roundtrip".into(),
        passed: json_ok,
        detail: format!(
            "{} bytes, {} events, {} viral videos",
            size,
            snapshot.events.len(),
            snapshot.viral_videos.len()
        ),
    });

    let mut bytes = Vec::new();
    let binary_ok = persistence::export_binary(&snapshot, &mut bytes).is_ok()
        && persistence::import_binary(bytes.as_slice()).ok().as_ref() == Some(&snapshot);
    results.push(TestResult {
        name: "binary_roundtrip".into(),
        passed: binary_ok,
        detail: format!("{} bytes", bytes.len()),
    });

    let corrupt = MemoryStore::new();
    let _ = corrupt.set(persistence::SAVE_KEY, "{\"player\": 3}");
    results.push(TestResult {
        name: "corrupt_save_ignored".into(),
        passed: persistence::load_game(&corrupt).is_none(),
        detail: "unparsable save loads as no save".into(),
    });

    let scores = MemoryStore::new();
    let first = persistence::submit_score(&scores, MiniGame::Snake, 30).unwrap_or(false);
    let lower = persistence::submit_score(&scores, MiniGame::Snake, 10).unwrap_or(true);
    let best = persistence::best_score(&scores, MiniGame::Snake);
    let other = persistence::best_score(&scores, MiniGame::Game2048);
    results.push(TestResult {
        name: "high_scores".into(),
        passed: first && !lower && best == 30 && other == 0,
        detail: format!("snake best {}, 2048 best {}", best, other),
    });

    results
}

// ── 6. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(config: &SimConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let (a, _) = play_career(config, Career::Musician, options.seed, options.days);
    let (b, _) = play_career(config, Career::Musician, options.seed, options.days);
    results.push(TestResult {
        name: "same_seed_same_game".into(),
        passed: a == b,
        detail: format!("seed {} replayed over {} days", options.seed, options.days),
    });

    let (c, _) = play_career(config, Career::Musician, options.seed + 1, options.days);
    results.push(TestResult {
        name: "different_seed_diverges".into(),
        passed: a != c,
        detail: format!("seeds {} and {}", options.seed, options.seed + 1),
    });

    results
}
