pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{SoundEvent, GameEvent};
pub use core::time::{FixedTimestep, IntervalTimer};
pub use core::viewport::Viewport;
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::color::VectorColor;
pub use systems::effects::{
    ConfettiBurst, ConfettiOptions, ConfettiShape, EffectsState, Launch, Particle, Rng,
};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};
