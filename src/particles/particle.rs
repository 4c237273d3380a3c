//! A single simulated particle.

use crate::scene::{NodeId, Property, SceneGraph, Vec2};

/// Transient particle state.
///
/// The simulator owns the kinematics; the scene node is only a mirror of
/// them and is destroyed with the particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Visual handle, owned by the effect that spawned the particle.
    pub node: NodeId,
    pub position: Vec2,
    /// px/s
    pub velocity: Vec2,
    /// px/s², integrated alongside the emitter's gravity.
    pub acceleration: Vec2,
    /// Seconds left to live.
    pub life: f32,
    /// Lifetime at spawn, in seconds.
    pub max_life: f32,
    pub scale: f32,
    /// Scale change per second, chosen so `scale` lands on the end scale
    /// exactly when `life` reaches zero.
    pub scale_rate: f32,
    pub alpha: f32,
}

impl Particle {
    /// A particle at full opacity that will shrink or grow from
    /// `start_scale` to `end_scale` over `lifetime` seconds.
    #[must_use]
    pub fn new(
        node: NodeId,
        position: Vec2,
        velocity: Vec2,
        lifetime: f32,
        start_scale: f32,
        end_scale: f32,
    ) -> Self {
        let scale_rate = if lifetime > 0.0 {
            (end_scale - start_scale) / lifetime
        } else {
            0.0
        };
        Self {
            node,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            life: lifetime,
            max_life: lifetime,
            scale: start_scale,
            scale_rate,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Advance by `dt` seconds. Returns `false` once the particle has died.
    pub fn advance(&mut self, dt: f32, gravity: f32) -> bool {
        self.life -= dt;

        self.velocity.x += self.acceleration.x * dt;
        self.velocity.y += (self.acceleration.y + gravity) * dt;
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;

        self.scale += self.scale_rate * dt;

        self.alpha = if self.max_life > 0.0 {
            (self.life / self.max_life).max(0.0)
        } else {
            0.0
        };

        self.life > 0.0
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Copy the simulated state onto the scene node.
    pub fn sync(&self, scene: &mut dyn SceneGraph) {
        scene.set_position(self.node, self.position);
        scene.set_scale(self.node, self.scale);
        scene.set(self.node, Property::Alpha, self.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(lifetime: f32, start: f32, end: f32) -> Particle {
        Particle::new(NodeId(1), Vec2::ZERO, Vec2::new(10.0, -20.0), lifetime, start, end)
    }

    #[test]
    fn test_spawn_state() {
        let p = particle(1.0, 0.5, 0.0);

        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.life, p.max_life);
        assert_eq!(p.scale, 0.5);
        assert_eq!(p.scale_rate, -0.5);
        assert!(p.is_alive());
    }

    #[test]
    fn test_kinematics() {
        let mut p = particle(2.0, 1.0, 1.0);

        assert!(p.advance(0.5, 100.0));
        // vy integrates gravity before the position step
        assert_eq!(p.velocity, Vec2::new(10.0, 30.0));
        assert_eq!(p.position, Vec2::new(5.0, 15.0));
        assert_eq!(p.alpha, 0.75);
    }

    #[test]
    fn test_acceleration() {
        let mut p = particle(2.0, 1.0, 1.0).with_acceleration(Vec2::new(4.0, 2.0));

        p.advance(0.5, 0.0);
        assert_eq!(p.velocity, Vec2::new(12.0, -19.0));
    }

    #[test]
    fn test_reaches_end_scale_and_zero_alpha_at_death() {
        let mut p = particle(0.8, 0.6, 0.1);
        let steps = 8;
        let mut alive = true;
        for _ in 0..steps {
            alive = p.advance(0.1, -150.0);
        }

        assert!(!alive || p.life.abs() < 1e-5);
        assert!((p.scale - 0.1).abs() < 1e-4);
        assert!(p.alpha.abs() < 1e-4);
    }

    #[test]
    fn test_zero_lifetime_dies_immediately() {
        let mut p = particle(0.0, 1.0, 0.0);
        assert_eq!(p.scale_rate, 0.0);
        assert!(!p.advance(0.016, 0.0));
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn test_sync() {
        let mut scene = crate::scene::MemoryScene::new();
        let node = scene.create_node(Some("fire_00.png"));
        let mut p = Particle::new(node, Vec2::new(3.0, 4.0), Vec2::ZERO, 1.0, 0.5, 0.0);
        p.advance(0.5, 0.0);
        p.sync(&mut scene);

        assert_eq!(scene.position(node), Vec2::new(3.0, 4.0));
        assert_eq!(scene.get(node, Property::ScaleX), 0.25);
        assert_eq!(scene.get(node, Property::ScaleY), 0.25);
        assert_eq!(scene.get(node, Property::Alpha), 0.5);
    }
}
