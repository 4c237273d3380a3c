//! Smoothed pointer tracking.

use crate::scene::Vec2;

/// Fraction of the remaining distance covered each frame.
pub const FOLLOW_LERP: f32 = 0.1;

/// Eases a position towards a moving target, one fixed fraction per frame.
///
/// The step is per frame, not per millisecond, so faster frame rates track
/// the pointer more tightly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Follow {
    target: Vec2,
    lerp: f32,
}

impl Follow {
    #[must_use]
    pub fn new(target: Vec2) -> Self {
        Self { target, lerp: FOLLOW_LERP }
    }

    #[must_use]
    pub fn with_lerp(mut self, lerp: f32) -> Self {
        self.lerp = lerp.clamp(0.0, 1.0);
        self
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// The next position after `current`.
    #[must_use]
    pub fn step(&self, current: Vec2) -> Vec2 {
        current.lerp(self.target, self.lerp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_towards_target() {
        let follow = Follow::new(Vec2::new(100.0, 0.0)).with_lerp(0.5);

        let next = follow.step(Vec2::ZERO);
        assert_eq!(next, Vec2::new(50.0, 0.0));
        assert_eq!(follow.step(next), Vec2::new(75.0, 0.0));
    }

    #[test]
    fn test_converges() {
        let mut follow = Follow::new(Vec2::ZERO);
        follow.set_target(Vec2::new(-200.0, 50.0));

        let mut position = Vec2::new(400.0, 180.0);
        for _ in 0..200 {
            position = follow.step(position);
        }
        assert!(position.distance(follow.target()) < 0.01);
    }

    #[test]
    fn test_lerp_is_clamped() {
        let follow = Follow::new(Vec2::new(10.0, 10.0)).with_lerp(3.0);
        assert_eq!(follow.step(Vec2::ZERO), Vec2::new(10.0, 10.0));
    }
}
