use dot_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    Viewport,
};
use dot_engine::bridge::protocol::{
    HEADER_EVENT_COUNT, HEADER_SOUND_COUNT, HEADER_VIEW_REVISION,
};
#[cfg(feature = "vectors")]
use dot_engine::VectorState;
use glam::Vec2;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    viewport: Viewport,
    initialized: bool,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    /// Last view model produced by the game, and how often it changed.
    view: String,
    view_revision: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let viewport = Viewport::identity(config.world_size());

        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            timestep,
            layout,
            viewport,
            sound_buffer: Vec::with_capacity(config.max_sounds),
            config,
            game,
            initialized: false,
            view: String::new(),
            view_revision: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.pack_frame_output();
        self.refresh_view();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Push a pointer event given in client (CSS pixel) coordinates.
    pub fn push_client_pointer(&mut self, kind: PointerKind, x: f32, y: f32) {
        let world = self.viewport.to_world(Vec2::new(x, y));
        let event = match kind {
            PointerKind::Down => InputEvent::PointerDown { x: world.x, y: world.y },
            PointerKind::Move => InputEvent::PointerMove { x: world.x, y: world.y },
            PointerKind::Up => InputEvent::PointerUp { x: world.x, y: world.y },
        };
        self.input.push(event);
    }

    /// Update the client rectangle the world is letterboxed into.
    pub fn resize(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.viewport = Viewport::fit(self.config.world_size(), left, top, width, height);
        log::debug!("viewport resized: {width}x{height}, scale {}", self.viewport.scale());
    }

    /// Run one frame tick: update game, advance effects, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            // Input is consumed by the first step only; later catch-up steps
            // see an empty queue so no event is applied twice.
            let idle = InputQueue::new();
            for step in 0..steps {
                let input = if step == 0 { &self.input } else { &idle };
                self.game.update(&mut self.ctx, input);
                self.ctx.effects.tick(self.timestep.dt());
            }
            self.input.drain();
        }

        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            self.ctx.effects.draw(&mut self.vectors);
        }

        self.pack_frame_output();
        self.refresh_view();
    }

    fn pack_frame_output(&mut self) {
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
        self.ctx.events.truncate(self.layout.max_events);
    }

    fn refresh_view(&mut self) {
        if let Some(view) = self.game.view() {
            if view != self.view {
                self.view = view;
                self.view_revision = self.view_revision.wrapping_add(1);
            }
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Data accessors for host reads ----

    pub fn view_json(&self) -> String {
        self.view.clone()
    }

    pub fn view_revision(&self) -> u32 {
        self.view_revision
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    /// Header with the init values plus this frame's counts and view revision.
    pub fn header(&self) -> Vec<f32> {
        let mut header = self.layout.header(&self.config);
        #[cfg(feature = "vectors")]
        {
            header[dot_engine::bridge::protocol::HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count() as f32;
        }
        header[HEADER_SOUND_COUNT] = self.sound_events_len() as f32;
        header[HEADER_EVENT_COUNT] = self.game_events_len() as f32;
        header[HEADER_VIEW_REVISION] = self.view_revision as f32;
        header.to_vec()
    }
}

/// Pointer phases that arrive in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dot_engine::{GameEvent, SoundEvent};

    /// Records every pointer event it sees, once per update.
    struct Recorder {
        seen: Vec<InputEvent>,
        updates: u32,
    }

    impl Game for Recorder {
        fn config(&self) -> GameConfig {
            GameConfig {
                world_width: 900.0,
                world_height: 500.0,
                ..GameConfig::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.emit_sound(SoundEvent(1));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for ev in input.iter() {
                self.seen.push(*ev);
                ctx.emit_event(GameEvent::signal(1.0));
            }
        }

        fn view(&self) -> Option<String> {
            Some(format!("{{\"seen\":{}}}", self.seen.len()))
        }
    }

    fn runner() -> GameRunner<Recorder> {
        let mut r = GameRunner::new(Recorder { seen: Vec::new(), updates: 0 });
        r.init();
        r
    }

    #[test]
    fn init_sounds_are_published() {
        let r = runner();
        assert_eq!(r.sound_events_len(), 1);
    }

    #[test]
    fn input_is_applied_once_even_with_catch_up_steps() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        r.tick(3.0 / 60.0 + 0.001);
        assert!(r.game().updates >= 3);
        assert_eq!(r.game().seen.len(), 1);
        assert_eq!(r.game_events_len(), 1);
    }

    #[test]
    fn input_waits_for_the_next_step() {
        let mut r = runner();
        r.push_input(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        r.tick(0.001);
        assert!(r.game().seen.is_empty());
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().seen.len(), 1);
    }

    #[test]
    fn client_pointer_goes_through_viewport() {
        let mut r = runner();
        r.resize(0.0, 0.0, 1800.0, 1000.0);
        r.push_client_pointer(PointerKind::Down, 100.0, 700.0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.game().seen[0], InputEvent::PointerDown { x: 50.0, y: 350.0 });
    }

    #[test]
    fn view_revision_bumps_only_on_change() {
        let mut r = runner();
        let rev = r.view_revision();
        r.tick(1.0 / 60.0);
        assert_eq!(r.view_revision(), rev);
        r.push_input(InputEvent::PointerLeave);
        r.tick(1.0 / 60.0);
        assert_eq!(r.view_revision(), rev + 1);
        assert_eq!(r.view_json(), "{\"seen\":1}");
    }

    #[test]
    fn header_tracks_view_revision_and_counts() {
        let mut r = runner();
        r.push_input(InputEvent::PointerLeave);
        r.tick(1.0 / 60.0);

        let header = r.header();
        assert_eq!(header[HEADER_VIEW_REVISION], r.view_revision() as f32);
        assert_eq!(header[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 0.0);
    }
}
