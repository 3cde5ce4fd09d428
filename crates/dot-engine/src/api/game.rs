use glam::Vec2;

use crate::api::types::{GameEvent, SoundEvent};
use crate::input::queue::InputQueue;
use crate::systems::effects::EffectsState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of vector vertices per frame (default: 32768).
    pub max_vector_vertices: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the effects RNG. Fixed so replays look identical.
    pub seed: u64,
}

impl GameConfig {
    /// World size as a vector.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_vector_vertices: 32768,
            max_sounds: 32,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Consume input, advance state, start effects.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// JSON view model for the host's DOM/SVG layer.
    /// `None` means the game renders exclusively through the vector buffer.
    fn view(&self) -> Option<String> {
        None
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub effects: EffectsState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    world_size: Vec2,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context sized and seeded from the game's configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            effects: EffectsState::new(config.seed),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            world_size: config.world_size(),
        }
    }

    /// Size of the world in game units.
    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start a confetti burst covering the whole world.
    pub fn celebrate(&mut self) {
        let size = self.world_size;
        self.effects.start_confetti(size);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_world_size() {
        let config = GameConfig {
            world_width: 900.0,
            world_height: 500.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::from_config(&config);
        assert_eq!(ctx.world_size(), Vec2::new(900.0, 500.0));
    }

    #[test]
    fn clear_frame_data_drops_sounds_and_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent::signal(2.0));
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn celebrate_starts_a_burst() {
        let mut ctx = EngineContext::new();
        assert!(!ctx.effects.is_celebrating());
        ctx.celebrate();
        assert!(ctx.effects.is_celebrating());
    }
}
