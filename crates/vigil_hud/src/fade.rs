//! Fade-out lifecycle of a single indicator

/// What started a fade episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeCause {
    /// The subject died or its health reached zero
    Death,
    /// The creature left its battle while battle-only display is on
    BattleEnded,
}

/// Opacity of one indicator.
///
/// Stable indicators are fully opaque with no elapsed fade ticks; a fade
/// episode ramps alpha linearly from 1 to 0 over a fixed number of ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeState {
    alpha: f32,
    fade_ticks: u32,
    cause: Option<FadeCause>,
}

impl FadeState {
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            fade_ticks: 0,
            cause: None,
        }
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn fade_ticks(&self) -> u32 {
        self.fade_ticks
    }

    #[inline]
    pub fn cause(&self) -> Option<FadeCause> {
        self.cause
    }

    #[inline]
    pub fn is_fading_out(&self) -> bool {
        self.cause.is_some()
    }

    /// Begin a fade episode. Returns `true` if a new episode started.
    ///
    /// An episode already running keeps its progress; a death during a
    /// battle-ended fade takes over as the cause.
    pub fn start(&mut self, cause: FadeCause) -> bool {
        match self.cause {
            None => {
                self.cause = Some(cause);
                self.fade_ticks = 0;
                self.alpha = 1.0;
                true
            }
            Some(FadeCause::BattleEnded) if cause == FadeCause::Death => {
                self.cause = Some(FadeCause::Death);
                false
            }
            Some(_) => false,
        }
    }

    /// Back to stable and fully opaque
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether the condition that started this episode has cleared.
    ///
    /// A death fade ends when the subject is alive again; a battle-ended
    /// fade ends when the creature is alive and back in a battle.
    pub fn can_resume(&self, is_dead: bool, in_battle: bool) -> bool {
        match self.cause {
            Some(FadeCause::Death) => !is_dead,
            Some(FadeCause::BattleEnded) => !is_dead && in_battle,
            None => false,
        }
    }

    /// Advance one tick; returns the new alpha
    pub fn advance(&mut self, duration_ticks: u32) -> f32 {
        if self.is_fading_out() {
            self.fade_ticks = self.fade_ticks.saturating_add(1);
            let progress = self.fade_ticks as f32 / duration_ticks.max(1) as f32;
            self.alpha = (1.0 - progress).clamp(0.0, 1.0);
        }
        self.alpha
    }

    /// The episode has run its full length
    pub fn is_complete(&self) -> bool {
        self.is_fading_out() && self.alpha <= 0.0
    }
}

impl Default for FadeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_state() {
        let mut fade = FadeState::new();
        assert_eq!(fade.advance(20), 1.0);
        assert_eq!(fade.fade_ticks(), 0);
        assert!(!fade.is_fading_out());
        assert!(!fade.is_complete());
    }

    #[test]
    fn test_linear_ramp() {
        let mut fade = FadeState::new();
        assert!(fade.start(FadeCause::Death));

        let mut previous = fade.alpha();
        for tick in 1..=4 {
            let alpha = fade.advance(4);
            assert_eq!(alpha, 1.0 - tick as f32 / 4.0);
            assert!(alpha <= previous);
            previous = alpha;
        }
        assert!(fade.is_complete());

        // Stays clamped at zero
        assert_eq!(fade.advance(4), 0.0);
    }

    #[test]
    fn test_restart_keeps_progress() {
        let mut fade = FadeState::new();
        fade.start(FadeCause::BattleEnded);
        fade.advance(10);
        fade.advance(10);

        assert!(!fade.start(FadeCause::BattleEnded));
        assert!(!fade.start(FadeCause::Death));
        assert_eq!(fade.fade_ticks(), 2);
        assert_eq!(fade.cause(), Some(FadeCause::Death));
    }

    #[test]
    fn test_reset() {
        let mut fade = FadeState::new();
        fade.start(FadeCause::Death);
        fade.advance(10);
        fade.reset();

        assert_eq!(fade, FadeState::new());
        assert_eq!(fade.alpha(), 1.0);
        assert_eq!(fade.fade_ticks(), 0);
    }

    #[test]
    fn test_resume_rules() {
        let mut death = FadeState::new();
        death.start(FadeCause::Death);
        assert!(!death.can_resume(true, false));
        assert!(death.can_resume(false, false));

        let mut ended = FadeState::new();
        ended.start(FadeCause::BattleEnded);
        assert!(!ended.can_resume(false, false));
        assert!(ended.can_resume(false, true));
        assert!(!ended.can_resume(true, true));

        assert!(!FadeState::new().can_resume(false, true));
    }
}
