use glam::Vec2;
use serde::Serialize;

use crate::points::PointSet;

/// Capture radii for matching the pointer against targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// Radius around the first dot that enters the sequence on press.
    pub start_radius: f32,
    /// Radius around every later dot that commits a segment on move.
    pub target_radius: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            start_radius: 30.0,
            target_radius: 15.0,
        }
    }
}

/// Where the play-through stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TracePhase {
    /// Nothing reached yet.
    Idle,
    /// The first dot has been pressed; later dots are being traced.
    Tracing,
    /// Every dot has been reached. Drawing is disabled.
    Completed,
    /// The proposal has been accepted.
    Accepted,
}

/// Result of feeding one input to the tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// A stroke opened away from the first dot, or after the sequence began.
    StrokeStarted,
    /// The press landed on the first dot: the sequence has begun.
    Started,
    /// The stroke grew but reached nothing.
    Extended,
    /// The dot at `reached` was hit and a segment was committed.
    Advanced { reached: usize },
    /// The last dot was hit. Drawing is now disabled.
    Completed,
    /// An uncommitted stroke of `points` samples was thrown away.
    Discarded { points: usize },
    /// The proposal was accepted.
    Accepted,
    /// The input had no effect in the current state.
    Ignored,
}

/// Pointer-driven connect-the-dots state machine.
///
/// Progress only ever moves forward by one, and only when the pointer comes
/// strictly within the capture radius of the dot at the current index.
/// Committed segments are never modified or removed.
#[derive(Debug, Clone)]
pub struct DotTracer {
    targets: PointSet,
    config: TraceConfig,
    /// Number of dots reached; also the index of the next dot.
    progress: usize,
    /// In-progress freehand stroke, if the pointer is down.
    stroke: Option<Vec<Vec2>>,
    committed: Vec<Vec<Vec2>>,
    completed: bool,
    accepted: bool,
}

impl DotTracer {
    pub fn new(targets: PointSet, config: TraceConfig) -> Self {
        Self {
            targets,
            config,
            progress: 0,
            stroke: None,
            committed: Vec::new(),
            completed: false,
            accepted: false,
        }
    }

    /// Pointer pressed at `pos`.
    pub fn begin_stroke(&mut self, pos: Vec2) -> TraceOutcome {
        if self.completed {
            return TraceOutcome::Ignored;
        }
        self.stroke = Some(vec![pos]);

        if self.progress > 0 {
            return TraceOutcome::StrokeStarted;
        }
        let Some(first) = self.targets.get(0) else {
            return TraceOutcome::StrokeStarted;
        };
        if pos.distance(first.pos) >= self.config.start_radius {
            return TraceOutcome::StrokeStarted;
        }

        self.progress = 1;
        if self.progress == self.targets.len() {
            // A single-dot message is done as soon as it is pressed.
            self.finish();
            return TraceOutcome::Completed;
        }
        TraceOutcome::Started
    }

    /// Pointer moved to `pos` while pressed.
    pub fn extend_stroke(&mut self, pos: Vec2) -> TraceOutcome {
        if self.completed {
            return TraceOutcome::Ignored;
        }
        let Some(stroke) = self.stroke.as_mut() else {
            return TraceOutcome::Ignored;
        };
        stroke.push(pos);

        if self.progress == 0 {
            return TraceOutcome::Extended;
        }
        let Some(target) = self.targets.get(self.progress) else {
            return TraceOutcome::Extended;
        };
        if pos.distance(target.pos) < self.config.target_radius {
            self.commit_and_advance(pos)
        } else {
            TraceOutcome::Extended
        }
    }

    /// Seal the active stroke at the current target and move on.
    fn commit_and_advance(&mut self, pos: Vec2) -> TraceOutcome {
        let reached = self.progress;
        let target = match self.targets.get(reached) {
            Some(t) => t.pos,
            None => return TraceOutcome::Ignored,
        };

        let mut sealed = self.stroke.take().unwrap_or_default();
        sealed.push(target);
        self.committed.push(sealed);
        self.stroke = Some(vec![pos]);

        if reached + 1 == self.targets.len() {
            self.progress = self.targets.len();
            self.finish();
            TraceOutcome::Completed
        } else {
            self.progress += 1;
            TraceOutcome::Advanced { reached }
        }
    }

    fn finish(&mut self) {
        self.completed = true;
        self.stroke = None;
    }

    /// Pointer released or left the surface: drop whatever was not committed.
    pub fn end_stroke(&mut self) -> TraceOutcome {
        match self.stroke.take() {
            Some(points) => TraceOutcome::Discarded { points: points.len() },
            None => TraceOutcome::Ignored,
        }
    }

    /// Say yes. Only possible once, and only after the last dot.
    pub fn accept(&mut self) -> TraceOutcome {
        if !self.completed || self.accepted {
            return TraceOutcome::Ignored;
        }
        self.accepted = true;
        TraceOutcome::Accepted
    }

    pub fn phase(&self) -> TracePhase {
        if self.accepted {
            TracePhase::Accepted
        } else if self.completed {
            TracePhase::Completed
        } else if self.progress == 0 {
            TracePhase::Idle
        } else {
            TracePhase::Tracing
        }
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn targets(&self) -> &PointSet {
        &self.targets
    }

    pub fn committed(&self) -> &[Vec<Vec2>] {
        &self.committed
    }

    /// Samples of the in-progress stroke (empty when the pointer is up).
    pub fn current_stroke(&self) -> &[Vec2] {
        self.stroke.as_deref().unwrap_or(&[])
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}
