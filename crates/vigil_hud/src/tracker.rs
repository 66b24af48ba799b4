//! Per-subject animation and fade tracking
//!
//! The host calls [`HealthIndicatorTracker::tick`] once per simulation tick
//! from a single thread. Renderers read displayed values and alpha by id at
//! frame rate, from any thread, between ticks.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use vigil_capability::CapabilityResolver;
use vigil_core::{Subject, SubjectId, WorldView};
use vigil_health::effective_health;

use crate::animation::AnimatedHealth;
use crate::config::IndicatorConfig;
use crate::fade::{FadeCause, FadeState};

/// Everything a renderer needs for one indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    /// `None` when the subject is not tracked
    pub displayed_health: Option<f32>,
    pub alpha: f32,
    pub is_fading_out: bool,
}

#[derive(Default)]
struct TrackerState {
    animated: HashMap<SubjectId, AnimatedHealth>,
    fades: HashMap<SubjectId, FadeState>,
    /// Battle membership of extension creatures as of the previous tick
    was_in_battle: HashMap<SubjectId, bool>,
}

impl TrackerState {
    fn clear(&mut self) {
        self.animated.clear();
        self.fades.clear();
        self.was_in_battle.clear();
    }

    fn is_empty(&self) -> bool {
        self.animated.is_empty() && self.fades.is_empty() && self.was_in_battle.is_empty()
    }
}

/// What one tick learned about one subject, gathered before taking the lock
struct Observation {
    id: SubjectId,
    /// `None` when no health reading could be produced this tick
    target: Option<f32>,
    is_dead: bool,
    is_creature: bool,
    in_battle: bool,
}

/// Animation and fade state for every tracked subject.
///
/// Construct one per client session and share it by `Arc` between the tick
/// driver and the renderer. All three maps sit behind a single lock; they
/// are small and always updated together.
pub struct HealthIndicatorTracker {
    resolver: Arc<CapabilityResolver>,
    config: RwLock<IndicatorConfig>,
    state: RwLock<TrackerState>,
}

impl HealthIndicatorTracker {
    pub fn new(resolver: Arc<CapabilityResolver>) -> Self {
        Self {
            resolver,
            config: RwLock::new(IndicatorConfig::default()),
            state: RwLock::new(TrackerState::default()),
        }
    }

    /// Invalid values fall back to their defaults
    pub fn with_config(self, config: IndicatorConfig) -> Self {
        *self.config.write() = config.sanitized();
        self
    }

    /// Replace the configuration; takes effect on the next tick. Invalid
    /// values fall back to their defaults.
    pub fn set_config(&self, config: IndicatorConfig) {
        *self.config.write() = config.sanitized();
    }

    pub fn config(&self) -> IndicatorConfig {
        self.config.read().clone()
    }

    pub fn resolver(&self) -> &Arc<CapabilityResolver> {
        &self.resolver
    }

    /// Advance every indicator by one simulation tick.
    ///
    /// `None` means there is no active world: all state is dropped.
    pub fn tick(&self, world: Option<&dyn WorldView>) {
        let Some(world) = world else {
            self.clear();
            return;
        };

        let config = self.config();
        let observations: Vec<Observation> = world
            .renderable_living_subjects()
            .into_iter()
            .map(|subject| self.observe(subject, config.prefer_battle_ui))
            .collect();

        let mut guard = self.state.write();
        let TrackerState {
            animated,
            fades,
            was_in_battle,
        } = &mut *guard;

        let mut seen = HashSet::with_capacity(observations.len());
        let mut started = HashSet::new();

        for obs in &observations {
            seen.insert(obs.id);

            let was_battling = was_in_battle.get(&obs.id).copied().unwrap_or(false);
            if obs.is_creature {
                was_in_battle.insert(obs.id, obs.in_battle);
            }
            let battle_ended =
                obs.is_creature && config.battle_only && was_battling && !obs.in_battle;

            let fade = fades.entry(obs.id).or_default();
            if obs.is_dead || battle_ended {
                let cause = if obs.is_dead {
                    FadeCause::Death
                } else {
                    FadeCause::BattleEnded
                };
                if fade.start(cause) {
                    log::debug!("Indicator for {} fading out ({:?})", obs.id, cause);
                    started.insert(obs.id);
                }
            } else if fade.can_resume(obs.is_dead, obs.in_battle) {
                log::debug!("Indicator for {} restored", obs.id);
                fade.reset();
            }

            if let Some(target) = obs.target {
                animated
                    .entry(obs.id)
                    .or_insert_with(|| AnimatedHealth::new(target))
                    .step(target, config.lerp_speed, config.snap_epsilon);
            }
        }

        let mut finished = Vec::new();
        fades.retain(|id, fade| {
            // An episode begun this tick shows full alpha until the next one
            if !started.contains(id) {
                fade.advance(config.fade_out_ticks);
            }
            if fade.is_complete() {
                finished.push(*id);
                return false;
            }
            seen.contains(id) || fade.is_fading_out()
        });

        for id in &finished {
            log::debug!("Indicator for {} faded out", id);
            animated.remove(id);
            was_in_battle.remove(id);
        }

        animated.retain(|id, _| {
            seen.contains(id) || fades.get(id).is_some_and(|fade| fade.is_fading_out())
        });
        was_in_battle.retain(|id, _| seen.contains(id));
    }

    fn observe(&self, subject: &dyn Subject, prefer_battle_ui: bool) -> Observation {
        let target = effective_health(subject, &self.resolver, prefer_battle_ui).map(|r| r.current);
        let is_creature = self.resolver.is_extension_creature(subject);

        Observation {
            id: subject.id(),
            target,
            is_dead: subject.is_dead_or_dying() || target.is_some_and(|health| health <= 0.0),
            is_creature,
            in_battle: is_creature && self.resolver.battle_id(subject).is_some(),
        }
    }

    /// Health to draw for `subject`.
    ///
    /// A subject seen for the first time is initialized to its authoritative
    /// health, so its indicator appears without animating. Falls back to 0
    /// when no reading exists at all.
    pub fn displayed_health(&self, subject: &dyn Subject) -> f32 {
        let id = subject.id();
        if let Some(health) = self.state.read().animated.get(&id) {
            return health.displayed();
        }

        let prefer_battle_ui = self.config.read().prefer_battle_ui;
        let Some(reading) = effective_health(subject, &self.resolver, prefer_battle_ui) else {
            return 0.0;
        };

        self.state
            .write()
            .animated
            .entry(id)
            .or_insert_with(|| AnimatedHealth::new(reading.current))
            .displayed()
    }

    /// Last displayed health of a tracked subject, including one that has
    /// left the world but is still fading
    pub fn displayed_health_by_id(&self, id: SubjectId) -> Option<f32> {
        self.state.read().animated.get(&id).map(AnimatedHealth::displayed)
    }

    /// Indicator opacity; 1.0 when untracked
    pub fn alpha(&self, id: SubjectId) -> f32 {
        self.state.read().fades.get(&id).map_or(1.0, FadeState::alpha)
    }

    /// Whether a fade episode is running; lets the renderer keep drawing a
    /// subject that already left the world
    pub fn is_fading_out(&self, id: SubjectId) -> bool {
        self.state
            .read()
            .fades
            .get(&id)
            .is_some_and(FadeState::is_fading_out)
    }

    /// Value, alpha and fade flag read under one lock
    pub fn snapshot(&self, id: SubjectId) -> IndicatorSnapshot {
        let state = self.state.read();
        let fade = state.fades.get(&id);

        IndicatorSnapshot {
            displayed_health: state.animated.get(&id).map(AnimatedHealth::displayed),
            alpha: fade.map_or(1.0, FadeState::alpha),
            is_fading_out: fade.is_some_and(FadeState::is_fading_out),
        }
    }

    /// Ids with any tracked state
    pub fn tracked_count(&self) -> usize {
        let state = self.state.read();
        let mut ids: HashSet<&SubjectId> = state.animated.keys().collect();
        ids.extend(state.fades.keys());
        ids.len()
    }

    /// Drop all state, e.g. when leaving a world
    pub fn clear(&self) {
        let mut state = self.state.write();
        if !state.is_empty() {
            log::debug!("Clearing indicator state for {} subjects", state.animated.len());
            state.clear();
        }
    }
}

impl std::fmt::Debug for HealthIndicatorTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthIndicatorTracker")
            .field("resolver", &self.resolver)
            .field("config", &*self.config.read())
            .field("tracked", &self.tracked_count())
            .finish()
    }
}
