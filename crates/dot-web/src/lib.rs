pub mod runner;

pub use runner::{GameRunner, PointerKind};

/// Expose a [`dot_engine::Game`] to the browser.
///
/// wasm-bindgen cannot export a generic `GameRunner<G>`, so this expands to
/// a per-game `thread_local!` runner plus free `#[wasm_bindgen]` functions
/// around it: lifecycle, pointer input (world and client space), custom UI
/// events, the JSON view and the shared-buffer accessors.
///
/// Append `vectors` to also export the tessellated vertex buffer.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use dot_engine::*;
///
/// mod game;
/// use game::LoveDots;
///
/// dot_web::export_game!(LoveDots, "love-dots", vectors);
/// ```
///
/// The game type needs a `new()` constructor; `$game_name` only shows up in
/// the startup log line.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Every export except `game_init` requires a prior `game_init` call.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut slot = cell.borrow_mut();
                let runner = slot.as_mut().expect("game_init() must run before any other export");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            runner.init();
            log::info!(
                "{}: ready ({}x{} world)",
                $game_name,
                runner.world_width(),
                runner.world_height()
            );

            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(left: f32, top: f32, width: f32, height: f32) {
            with_runner(|r| r.resize(left, top, width, height));
        }

        // ---- Pointer input in world coordinates ----

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        // ---- Pointer input in client coordinates ----

        #[wasm_bindgen]
        pub fn game_pointer_down_client(x: f32, y: f32) {
            with_runner(|r| r.push_client_pointer($crate::PointerKind::Down, x, y));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move_client(x: f32, y: f32) {
            with_runner(|r| r.push_client_pointer($crate::PointerKind::Move, x, y));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up_client(x: f32, y: f32) {
            with_runner(|r| r.push_client_pointer($crate::PointerKind::Up, x, y));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_view_json() -> String {
            with_runner(|r| r.view_json())
        }

        #[wasm_bindgen]
        pub fn get_view_revision() -> u32 {
            with_runner(|r| r.view_revision())
        }

        #[wasm_bindgen]
        pub fn get_header() -> Vec<f32> {
            with_runner(|r| r.header())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices())
        }
    };
}
