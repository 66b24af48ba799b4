//! Vigil simulation host
//!
//! Drives the health indicator core against a scripted world: two plain mobs
//! (one takes damage and dies, one wanders off) and an extension creature
//! that fights a battle. A render thread reads indicator state concurrently
//! with the simulation ticks.
//!
//! Run with: cargo run -p vigil_sim -- [indicators.toml]
//! Set `RUST_LOG=debug` to see fade lifecycle events.

mod scenario;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use vigil_capability::{CapabilityResolver, ExtensionId, ExtensionRegistry};
use vigil_core::{SubjectId, WorldView};
use vigil_hud::{HealthIndicatorTracker, IndicatorConfig};

use crate::scenario::{Scenario, BATTLE_END};

const TICKS: u32 = 80;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    log::info!(
        "Indicator config: battle_only={} prefer_battle_ui={} lerp_speed={} fade_out_ticks={}",
        config.battle_only,
        config.prefer_battle_ui,
        config.lerp_speed,
        config.fade_out_ticks
    );

    let mut scenario = Scenario::new();

    let mut registry = ExtensionRegistry::new();
    if let Err(e) = registry.register(scenario.extension()) {
        log::error!("Failed to register extension: {}", e);
        return;
    }

    let resolver = Arc::new(CapabilityResolver::from_registry(
        &registry,
        ExtensionId::CREATURE_BATTLES,
    ));
    let report = resolver.discovery();
    log::info!(
        "Capabilities: creature model {:?}, battle registry {:?}, battle UI {:?}",
        report.creature_model,
        report.battle_registry,
        report.battle_ui
    );

    let tracker = HealthIndicatorTracker::new(resolver).with_config(config);
    let subjects = scenario.subject_ids();
    let done = AtomicBool::new(false);
    let frames = AtomicU64::new(0);

    thread::scope(|s| {
        // Render thread: reads every known indicator as fast as it can
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                for (_, id) in &subjects {
                    let snapshot = tracker.snapshot(*id);
                    if snapshot.displayed_health.is_none() && snapshot.is_fading_out {
                        log::warn!("Fading indicator {} has no displayed value", id);
                    }
                }
                frames.fetch_add(1, Ordering::Relaxed);
                thread::yield_now();
            }
        });

        for tick in 1..=TICKS {
            scenario.advance(tick);
            tracker.tick(Some(&scenario as &dyn WorldView));
            log_tick(tick, &tracker, &subjects);
        }

        done.store(true, Ordering::Release);
    });

    log::info!(
        "Rendered {} frames over {} ticks; {} indicators tracked",
        frames.load(Ordering::Relaxed),
        TICKS,
        tracker.tracked_count()
    );

    // Leaving the world drops everything
    tracker.tick(None);
    log::info!("World closed; {} indicators tracked", tracker.tracked_count());
}

/// Config from the first argument, else defaults with battle-only display
fn load_config() -> IndicatorConfig {
    match std::env::args().nth(1) {
        Some(path) => IndicatorConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            IndicatorConfig::default()
        }),
        None => IndicatorConfig::default().with_battle_only(true),
    }
}

fn log_tick(tick: u32, tracker: &HealthIndicatorTracker, subjects: &[(&'static str, SubjectId)]) {
    let verbose = tick % 5 == 0 || tick == BATTLE_END + 1;

    for (name, id) in subjects {
        let snapshot = tracker.snapshot(*id);
        let Some(health) = snapshot.displayed_health else {
            continue;
        };

        if verbose || snapshot.is_fading_out {
            log::info!(
                "[tick {:>2}] {:<8} hp {:>6.2} alpha {:.2}{}",
                tick,
                name,
                health,
                snapshot.alpha,
                if snapshot.is_fading_out { " (fading)" } else { "" }
            );
        } else {
            log::debug!("[tick {:>2}] {:<8} hp {:>6.2}", tick, name, health);
        }
    }
}
