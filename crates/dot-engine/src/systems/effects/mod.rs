//! Visual effects system: confetti bursts and their particles.
//!
//! This module provides the `EffectsState` facade for managing all visual effects,
//! plus individual components that can be used directly if needed.

mod confetti;
mod particle;
mod rng;

pub use confetti::{ConfettiBurst, ConfettiOptions, PALETTE};
pub use particle::{ConfettiShape, Launch, Particle};
pub use rng::Rng;

use glam::Vec2;

#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Container for all visual effects.
/// Purely cosmetic: nothing here feeds back into game state.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub bursts: Vec<ConfettiBurst>,
    pub options: ConfettiOptions,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::with_capacity(1024),
            bursts: Vec::new(),
            options: ConfettiOptions::default(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Start a new confetti burst over a world of the given size.
    /// Bursts are independent; starting one never cancels another.
    pub fn start_confetti(&mut self, world: Vec2) {
        log::debug!("confetti burst started ({}s)", self.options.duration);
        self.bursts.push(ConfettiBurst::new(world, &self.options));
    }

    /// Cancel every running burst. Chips already in the air keep falling.
    pub fn cancel_confetti(&mut self) {
        self.bursts.clear();
    }

    /// Whether any burst is still launching chips.
    pub fn is_celebrating(&self) -> bool {
        self.bursts.iter().any(|b| !b.is_finished())
    }

    /// Advance bursts and particles.
    pub fn tick(&mut self, dt: f32) {
        for burst in &mut self.bursts {
            burst.tick(dt, &self.options, &mut self.rng, &mut self.particles);
        }
        self.bursts.retain(|b| !b.is_finished());
        self.particles.retain_mut(|p| p.tick(dt));
    }

    /// Tessellate all live particles into the vector buffer.
    #[cfg(feature = "vectors")]
    pub fn draw(&self, vectors: &mut VectorState) {
        for p in &self.particles {
            match p.shape {
                ConfettiShape::Square => vectors.fill_polygon(&p.quad(), p.fill()),
                ConfettiShape::Circle => {
                    let (center, radii) = p.oval();
                    vectors.fill_ellipse(center, radii, p.fill());
                }
            }
        }
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.bursts.clear();
        self.particles.clear();
    }
}
