//! Smoothed health values

/// A displayed health value easing toward its target once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedHealth {
    displayed: f32,
}

impl AnimatedHealth {
    /// Start at `initial` so the first frame shows no jump
    pub fn new(initial: f32) -> Self {
        Self { displayed: initial }
    }

    #[inline]
    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    /// Advance one tick toward `target`.
    ///
    /// Covers `speed` of the remaining distance and snaps onto the target
    /// once within `snap_epsilon`, so the value settles exactly. A
    /// non-finite target is ignored; a non-finite displayed value jumps
    /// straight to the target.
    pub fn step(&mut self, target: f32, speed: f32, snap_epsilon: f32) -> f32 {
        if !target.is_finite() {
            return self.displayed;
        }
        if !self.displayed.is_finite() {
            self.displayed = target;
            return self.displayed;
        }

        let next = lerp(self.displayed, target, speed.clamp(0.0, 1.0));

        self.displayed = if (next - target).abs() < snap_epsilon {
            target
        } else {
            next
        };
        self.displayed
    }

    pub fn is_settled(&self, target: f32) -> bool {
        self.displayed == target
    }
}

/// Linear interpolation
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
