//! Timed confetti bursts.
//!
//! A burst is a bounded repeating timer: every `interval` it fires two
//! volleys (left and right of centre) whose size shrinks linearly with the
//! time left, and after `duration` it stops on its own.

use glam::Vec2;

use super::particle::{ConfettiShape, Launch, Particle};
use super::rng::Rng;
use crate::core::time::IntervalTimer;
use crate::systems::color::VectorColor;

/// Default confetti palette.
pub const PALETTE: [u32; 7] = [
    0x26ccff, 0xa25afd, 0xff5e7e, 0x88ff5a, 0xfcff42, 0xffa62d, 0xff36ff,
];

/// Tunables for a confetti burst.
#[derive(Debug, Clone)]
pub struct ConfettiOptions {
    /// Total burst length in seconds.
    pub duration: f32,
    /// Seconds between volleys.
    pub interval: f32,
    /// Chips per volley at the start of the burst.
    pub peak_count: f32,
    /// Horizontal origin ranges as fractions of the world width.
    pub origins: [(f32, f32); 2],
    pub launch: Launch,
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            duration: 5.0,
            interval: 0.25,
            peak_count: 50.0,
            origins: [(0.1, 0.3), (0.7, 0.9)],
            launch: Launch::default(),
        }
    }
}

/// One running burst.
#[derive(Debug, Clone)]
pub struct ConfettiBurst {
    timer: IntervalTimer,
    world: Vec2,
}

impl ConfettiBurst {
    pub fn new(world: Vec2, options: &ConfettiOptions) -> Self {
        Self {
            timer: IntervalTimer::new(options.interval, options.duration),
            world,
        }
    }

    /// Chips per volley given the time left in the burst.
    pub fn volley_size(options: &ConfettiOptions, time_left: f32) -> usize {
        if options.duration <= 0.0 || time_left <= 0.0 {
            return 0;
        }
        (options.peak_count * (time_left / options.duration)) as usize
    }

    /// Advance the burst and push any newly launched chips.
    pub fn tick(
        &mut self,
        dt: f32,
        options: &ConfettiOptions,
        rng: &mut Rng,
        out: &mut Vec<Particle>,
    ) {
        for time_left in self.timer.advance(dt) {
            let count = Self::volley_size(options, time_left);
            for &(min_x, max_x) in &options.origins {
                let origin = Vec2::new(
                    rng.range(min_x, max_x) * self.world.x,
                    (rng.next_f32() - 0.2) * self.world.y,
                );
                for _ in 0..count {
                    let color = VectorColor::hex(PALETTE[rng.next_int(PALETTE.len() as u32) as usize]);
                    let shape = if rng.next_int(2) == 0 {
                        ConfettiShape::Square
                    } else {
                        ConfettiShape::Circle
                    };
                    out.push(Particle::launch(origin, &options.launch, color, shape, rng));
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }
}
