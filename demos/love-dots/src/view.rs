//! Serializable scene handed to the host page every time it changes.

use std::fmt::Write;

use glam::Vec2;
use serde::Serialize;

use crate::music::{Music, MusicState};
use crate::points::CANVAS;
use crate::proposal::PromptView;
use crate::tracing::{DotTracer, TracePhase};

pub const TITLE: &str = "Draw to connect the dots...";

const STROKE: &str = "#d81b60";
const STROKE_WIDTH: f32 = 3.0;
const CURRENT_OPACITY: f32 = 0.7;

const FILL_VISITED: &str = "#d81b60";
const FILL_NEXT: &str = "#ff80ab";
const FILL_PENDING: &str = "#ccc";

const RADIUS_NEXT: f32 = 6.0;
const RADIUS: f32 = 4.0;

const NUMBER_OFFSET: f32 = -12.0;
const WORD_OFFSET: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    Visited,
    Next,
    Pending,
}

impl MarkerStatus {
    fn of(index: usize, progress: usize) -> Self {
        use std::cmp::Ordering::*;
        match index.cmp(&progress) {
            Less => MarkerStatus::Visited,
            Equal => MarkerStatus::Next,
            Greater => MarkerStatus::Pending,
        }
    }

    fn fill(self) -> &'static str {
        match self {
            MarkerStatus::Visited => FILL_VISITED,
            MarkerStatus::Next => FILL_NEXT,
            MarkerStatus::Pending => FILL_PENDING,
        }
    }

    fn radius(self) -> f32 {
        match self {
            MarkerStatus::Next => RADIUS_NEXT,
            _ => RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathView {
    pub d: String,
    pub stroke: &'static str,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl PathView {
    fn new(points: &[Vec2], opacity: f32) -> Self {
        Self {
            d: points_to_path(points),
            stroke: STROKE,
            stroke_width: STROKE_WIDTH,
            opacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub fill: &'static str,
    pub status: MarkerStatus,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Number,
    Word,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelView {
    pub kind: LabelKind,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicView {
    pub state: MusicState,
    pub icon: &'static str,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub view_box: String,
    pub title: &'static str,
    pub phase: TracePhase,
    /// Whether a stroke is in progress.
    pub drawing: bool,
    pub progress: usize,
    pub total: usize,
    pub completed: bool,
    pub accepted: bool,
    pub paths: Vec<PathView>,
    pub current: PathView,
    pub markers: Vec<MarkerView>,
    pub labels: Vec<LabelView>,
    pub prompt: Option<PromptView>,
    pub music: MusicView,
}

impl SceneView {
    pub fn project(tracer: &DotTracer, music: &Music) -> Self {
        let progress = tracer.progress();
        let targets = tracer.targets();

        let paths = tracer
            .committed()
            .iter()
            .map(|seg| PathView::new(seg, 1.0))
            .collect();

        let mut markers = Vec::with_capacity(targets.len());
        let mut labels = Vec::with_capacity(targets.len() * 2);
        for (index, target) in targets.iter().enumerate() {
            let status = MarkerStatus::of(index, progress);
            let Vec2 { x, y } = target.pos;
            markers.push(MarkerView {
                index,
                x,
                y,
                r: status.radius(),
                fill: status.fill(),
                status,
                active: status == MarkerStatus::Next,
            });
            labels.push(LabelView {
                kind: LabelKind::Number,
                x,
                y: y + NUMBER_OFFSET,
                text: (index + 1).to_string(),
            });
            if let Some(word) = &target.label {
                labels.push(LabelView {
                    kind: LabelKind::Word,
                    x,
                    y: y + WORD_OFFSET,
                    text: word.clone(),
                });
            }
        }

        Self {
            view_box: format!("0 0 {} {}", CANVAS.x, CANVAS.y),
            title: TITLE,
            phase: tracer.phase(),
            drawing: tracer.is_drawing(),
            progress,
            total: targets.len(),
            completed: tracer.is_completed(),
            accepted: tracer.is_accepted(),
            paths,
            current: PathView::new(tracer.current_stroke(), CURRENT_OPACITY),
            markers,
            labels,
            prompt: PromptView::for_state(tracer.is_completed(), tracer.is_accepted()),
            music: MusicView {
                state: music.state(),
                icon: music.icon(),
                volume: music.volume(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// SVG path data through `points`, or an empty string when there is no line
/// to draw.
pub fn points_to_path(points: &[Vec2]) -> String {
    let [first, rest @ ..] = points else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }
    let mut d = format!("M {},{}", first.x, first.y);
    for p in rest {
        let _ = write!(d, " L {},{}", p.x, p.y);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{PointSet, TargetPoint};
    use crate::tracing::TraceConfig;

    fn tracer() -> DotTracer {
        let set = PointSet::new(
            vec![
                TargetPoint::new(100.0, 100.0).with_label("Hi"),
                TargetPoint::new(200.0, 100.0),
                TargetPoint::new(300.0, 100.0),
            ],
            CANVAS,
        )
        .unwrap();
        DotTracer::new(set, TraceConfig::default())
    }

    #[test]
    fn path_needs_two_points() {
        assert_eq!(points_to_path(&[]), "");
        assert_eq!(points_to_path(&[Vec2::new(1.0, 2.0)]), "");
    }

    #[test]
    fn path_data_format() {
        let d = points_to_path(&[Vec2::new(1.0, 2.0), Vec2::new(3.5, 4.0), Vec2::new(5.0, 6.0)]);
        assert_eq!(d, "M 1,2 L 3.5,4 L 5,6");
    }

    #[test]
    fn markers_are_coloured_by_status() {
        let mut t = tracer();
        t.begin_stroke(Vec2::new(100.0, 100.0));
        let scene = SceneView::project(&t, &Music::default());

        let fills: Vec<_> = scene.markers.iter().map(|m| m.fill).collect();
        assert_eq!(fills, ["#d81b60", "#ff80ab", "#ccc"]);
        let radii: Vec<_> = scene.markers.iter().map(|m| m.r).collect();
        assert_eq!(radii, [4.0, 6.0, 4.0]);
        assert!(scene.markers[1].active);
        assert!(!scene.markers[0].active);
    }

    #[test]
    fn labels_sit_above_and_below() {
        let scene = SceneView::project(&tracer(), &Music::default());
        assert_eq!(scene.labels.len(), 4);
        assert_eq!(scene.labels[0].text, "1");
        assert_eq!(scene.labels[0].y, 88.0);
        assert_eq!(scene.labels[1].kind, LabelKind::Word);
        assert_eq!(scene.labels[1].text, "Hi");
        assert_eq!(scene.labels[1].y, 118.0);
    }

    #[test]
    fn current_stroke_is_translucent() {
        let mut t = tracer();
        t.begin_stroke(Vec2::new(100.0, 100.0));
        t.extend_stroke(Vec2::new(120.0, 100.0));
        let scene = SceneView::project(&t, &Music::default());
        assert_eq!(scene.current.d, "M 100,100 L 120,100");
        assert_eq!(scene.current.opacity, 0.7);
        assert!(scene.paths.is_empty());
    }

    #[test]
    fn completed_scene_shows_prompt() {
        let mut t = tracer();
        t.begin_stroke(Vec2::new(100.0, 100.0));
        t.extend_stroke(Vec2::new(200.0, 100.0));
        t.extend_stroke(Vec2::new(300.0, 100.0));
        let scene = SceneView::project(&t, &Music::default());

        assert!(scene.completed);
        assert_eq!(scene.paths.len(), 2);
        assert!(scene.markers.iter().all(|m| m.status == MarkerStatus::Visited));
        assert!(matches!(scene.prompt, Some(PromptView::Asking { .. })));
    }

    #[test]
    fn json_uses_camel_case() {
        let json = SceneView::project(&tracer(), &Music::default()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["viewBox"], "0 0 900 500");
        assert_eq!(value["title"], TITLE);
        assert_eq!(value["current"]["strokeWidth"], 3.0);
        assert_eq!(value["music"]["icon"], "🔇");
        assert!(value["prompt"].is_null());
    }

    #[test]
    fn phase_follows_the_play_through() {
        let music = Music::default();
        let mut t = tracer();
        assert_eq!(SceneView::project(&t, &music).phase, TracePhase::Idle);

        t.begin_stroke(Vec2::new(100.0, 100.0));
        let scene = SceneView::project(&t, &music);
        assert_eq!(scene.phase, TracePhase::Tracing);
        assert!(scene.drawing);

        t.extend_stroke(Vec2::new(200.0, 100.0));
        t.extend_stroke(Vec2::new(300.0, 100.0));
        let scene = SceneView::project(&t, &music);
        assert_eq!(scene.phase, TracePhase::Completed);
        assert!(!scene.drawing);

        t.accept();
        let json = SceneView::project(&t, &music).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "accepted");
        assert_eq!(value["drawing"], false);
    }
}
