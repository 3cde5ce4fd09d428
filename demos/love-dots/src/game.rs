use dot_engine::*;
use glam::Vec2;

use crate::music::{Music, MusicConfig};
use crate::points::{PointSet, CANVAS};
use crate::tracing::{DotTracer, TraceConfig, TraceOutcome};
use crate::view::SceneView;

/// Custom event kinds from the host page
pub mod events {
    pub const ACCEPT: u32 = 1;
    pub const DECLINE: u32 = 2;
    pub const MUSIC_TOGGLE: u32 = 3;
    pub const AUDIO_STARTED: u32 = 4;
    pub const AUDIO_BLOCKED: u32 = 5;
    pub const DOCUMENT_CLICK: u32 = 6;
}

/// Game event kinds to the host page
pub mod game_events {
    /// a = dots reached, b = total dots
    pub const PROGRESS: f32 = 1.0;
    pub const COMPLETED: f32 = 2.0;
    pub const ACCEPTED: f32 = 3.0;
}

pub struct LoveDots {
    tracer: DotTracer,
    music: Music,
}

impl LoveDots {
    pub fn new() -> Self {
        Self {
            tracer: DotTracer::new(PointSet::default(), TraceConfig::default()),
            music: Music::new(MusicConfig::default()),
        }
    }

    fn report(&self, ctx: &mut EngineContext, outcome: TraceOutcome) {
        let total = self.tracer.targets().len();
        match outcome {
            TraceOutcome::Started | TraceOutcome::Advanced { .. } => {
                let reached = self.tracer.progress();
                log::debug!("dot {reached}/{total} reached");
                ctx.emit_event(GameEvent::new(
                    game_events::PROGRESS,
                    reached as f32,
                    total as f32,
                    0.0,
                ));
            }
            TraceOutcome::Completed => {
                log::info!("all {total} dots connected");
                ctx.emit_event(GameEvent::new(
                    game_events::PROGRESS,
                    total as f32,
                    total as f32,
                    0.0,
                ));
                ctx.emit_event(GameEvent::signal(game_events::COMPLETED));
                ctx.celebrate();
            }
            TraceOutcome::Accepted => {
                log::info!("proposal accepted");
                ctx.emit_event(GameEvent::signal(game_events::ACCEPTED));
                ctx.celebrate();
            }
            TraceOutcome::Discarded { points } => {
                log::debug!("stroke of {points} samples discarded");
            }
            TraceOutcome::StrokeStarted | TraceOutcome::Extended | TraceOutcome::Ignored => {}
        }
    }

    fn retry_music(&self, ctx: &mut EngineContext) {
        if let Some(sound) = self.music.on_interaction() {
            ctx.emit_sound(sound);
        }
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32) {
        match kind {
            events::ACCEPT => {
                let outcome = self.tracer.accept();
                self.report(ctx, outcome);
            }
            events::DECLINE => {
                log::debug!("\"No\" pressed; it stays disabled");
            }
            events::MUSIC_TOGGLE => {
                let sound = self.music.toggle();
                ctx.emit_sound(sound);
            }
            events::AUDIO_STARTED => self.music.on_started(),
            events::AUDIO_BLOCKED => self.music.on_blocked(),
            events::DOCUMENT_CLICK => self.retry_music(ctx),
            other => log::warn!("unknown custom event kind {other}"),
        }
    }
}

#[cfg(test)]
impl LoveDots {
    /// Start from an explicit set of targets instead of the built-in message.
    pub fn with_points(points: PointSet) -> Self {
        Self {
            tracer: DotTracer::new(points, TraceConfig::default()),
            ..Self::new()
        }
    }

    pub fn tracer(&self) -> &DotTracer {
        &self.tracer
    }

    pub fn music(&self) -> &Music {
        &self.music
    }
}

impl Default for LoveDots {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LoveDots {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: CANVAS.x,
            world_height: CANVAS.y,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if self.tracer.targets().is_empty() {
            match PointSet::builtin() {
                Ok(points) => self.tracer = DotTracer::new(points, TraceConfig::default()),
                Err(e) => log::error!("built-in message failed to load: {e}"),
            }
        }
        log::info!("love-dots: {} dots to connect", self.tracer.targets().len());

        ctx.emit_sound(self.music.request_autoplay());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match event {
                InputEvent::PointerDown { x, y } => {
                    self.retry_music(ctx);
                    let outcome = self.tracer.begin_stroke(Vec2::new(*x, *y));
                    self.report(ctx, outcome);
                }
                InputEvent::PointerMove { x, y } => {
                    let outcome = self.tracer.extend_stroke(Vec2::new(*x, *y));
                    self.report(ctx, outcome);
                }
                InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                    let outcome = self.tracer.end_stroke();
                    self.report(ctx, outcome);
                }
                InputEvent::Custom { kind, .. } => self.handle_custom(ctx, *kind),
            }
        }
    }

    fn view(&self) -> Option<String> {
        match SceneView::project(&self.tracer, &self.music).to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("view serialization failed: {e}");
                None
            }
        }
    }
}
