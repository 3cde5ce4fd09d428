//! Confetti particle: a tumbling paper chip with ballistic motion.
//!
//! Motion is expressed per 60 Hz "tick" and scaled by `dt * 60` so the
//! look does not depend on the fixed timestep chosen by the game.

use glam::Vec2;

use super::rng::Rng;
use crate::systems::color::VectorColor;

/// Shape of a confetti chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiShape {
    Square,
    Circle,
}

/// Per-volley launch parameters.
#[derive(Debug, Clone, Copy)]
pub struct Launch {
    /// Initial speed in world units per tick (randomised to 0.5x..1.5x).
    pub start_velocity: f32,
    /// Launch direction in degrees, 90 = straight up.
    pub angle: f32,
    /// Cone width in degrees around `angle`.
    pub spread: f32,
    /// Lifetime in ticks.
    pub ticks: f32,
    /// Downward pull per tick.
    pub gravity: f32,
    /// Speed multiplier applied every tick.
    pub decay: f32,
    /// Chip size multiplier.
    pub scalar: f32,
}

impl Default for Launch {
    fn default() -> Self {
        Self {
            start_velocity: 30.0,
            angle: 90.0,
            spread: 360.0,
            ticks: 60.0,
            gravity: 1.0,
            decay: 0.9,
            scalar: 1.0,
        }
    }
}

/// A single confetti chip with physics and rendering state.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    /// Heading in radians (screen space, Y down).
    heading: f32,
    velocity: f32,
    decay: f32,
    gravity: f32,
    wobble: f32,
    wobble_speed: f32,
    tilt_angle: f32,
    /// Fixed per-chip corner jitter in [0, 1).
    jitter: f32,
    scalar: f32,
    age: f32,
    lifetime: f32,
    pub color: VectorColor,
    pub shape: ConfettiShape,
}

impl Particle {
    /// Ticks per second the motion constants are tuned for.
    pub const TICK_RATE: f32 = 60.0;

    /// Launch a chip from `origin` with randomised heading, speed and wobble.
    pub fn launch(
        origin: Vec2,
        launch: &Launch,
        color: VectorColor,
        shape: ConfettiShape,
        rng: &mut Rng,
    ) -> Self {
        let rad_angle = launch.angle.to_radians();
        let rad_spread = launch.spread.to_radians();
        Self {
            position: origin,
            heading: -rad_angle + (0.5 * rad_spread - rng.next_f32() * rad_spread),
            velocity: launch.start_velocity * 0.5 + rng.next_f32() * launch.start_velocity,
            decay: launch.decay,
            gravity: launch.gravity * 3.0,
            wobble: rng.next_f32() * 10.0,
            wobble_speed: (rng.next_f32() * 0.1 + 0.05).min(0.11),
            tilt_angle: (rng.next_f32() * 0.5 + 0.25) * std::f32::consts::PI,
            jitter: rng.next_f32(),
            scalar: launch.scalar,
            age: 0.0,
            lifetime: launch.ticks,
            color,
            shape,
        }
    }

    /// Advance particle physics. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        let steps = dt * Self::TICK_RATE;
        self.age += steps;
        if self.age >= self.lifetime {
            return false;
        }

        self.position.x += self.heading.cos() * self.velocity * steps;
        self.position.y += (self.heading.sin() * self.velocity + self.gravity) * steps;
        self.velocity *= self.decay.powf(steps);
        self.wobble += self.wobble_speed * steps;
        self.tilt_angle += 0.1 * steps;

        true
    }

    /// Fraction of the lifetime used up (0.0 fresh, 1.0 expired).
    pub fn progress(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    /// Current fill color, fading out over the lifetime.
    pub fn fill(&self) -> VectorColor {
        self.color.with_alpha(self.color.a * (1.0 - self.progress()))
    }

    /// Outline of the chip as a tilted, wobbling quad.
    pub fn quad(&self) -> [Vec2; 4] {
        let wobble_offset = 10.0 * self.scalar;
        let wobble_at = self.position
            + Vec2::new(self.wobble.cos(), self.wobble.sin()) * wobble_offset;
        let tilt = Vec2::new(self.tilt_angle.cos(), self.tilt_angle.sin()) * self.jitter;
        let p = self.position;
        [
            p,
            Vec2::new(wobble_at.x, p.y + tilt.y),
            wobble_at + tilt,
            Vec2::new(p.x + tilt.x, wobble_at.y),
        ]
    }

    /// Centre and radii of the chip when drawn as an oval.
    pub fn oval(&self) -> (Vec2, Vec2) {
        let [p0, _, p2, _] = self.quad();
        let radii = ((p2 - p0).abs() * 0.6).max(Vec2::splat(0.5));
        (self.position, radii)
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }
}
