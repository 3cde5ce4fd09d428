use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

/// Logical drawing canvas every target lives on.
pub const CANVAS: Vec2 = Vec2::new(900.0, 500.0);

/// The hidden message, baked into the binary.
const BUILTIN_JSON: &str = include_str!("../assets/points.json");

/// One dot the player has to reach. Its index in the set is its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPoint {
    pub pos: Vec2,
    /// Word printed under the dot, if any.
    pub label: Option<String>,
}

#[cfg(test)]
impl TargetPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y), label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Wire shape of a point in the JSON asset.
#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Error)]
pub enum PointSetError {
    #[error("point set is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("point set is empty")]
    Empty,
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("point {index} at ({x}, {y}) lies outside the canvas")]
    OutOfCanvas { index: usize, x: f32, y: f32 },
}

/// Immutable, ordered sequence of targets.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<TargetPoint>,
}

impl PointSet {
    /// Validate and wrap a list of targets drawn on a `canvas`-sized surface.
    pub fn new(points: Vec<TargetPoint>, canvas: Vec2) -> Result<Self, PointSetError> {
        if points.is_empty() {
            return Err(PointSetError::Empty);
        }
        for (index, p) in points.iter().enumerate() {
            if !p.pos.is_finite() {
                return Err(PointSetError::NonFinite { index });
            }
            let inside = p.pos.x >= 0.0 && p.pos.y >= 0.0 && p.pos.x <= canvas.x && p.pos.y <= canvas.y;
            if !inside {
                return Err(PointSetError::OutOfCanvas { index, x: p.pos.x, y: p.pos.y });
            }
        }
        Ok(Self { points })
    }

    /// Parse a JSON array of `{ "x", "y", "label"? }` objects.
    pub fn from_json(json: &str, canvas: Vec2) -> Result<Self, PointSetError> {
        let raw: Vec<RawPoint> = serde_json::from_str(json)?;
        let points = raw
            .into_iter()
            .map(|p| TargetPoint { pos: Vec2::new(p.x, p.y), label: p.label })
            .collect();
        Self::new(points, canvas)
    }

    /// The message shipped with the game.
    pub fn builtin() -> Result<Self, PointSetError> {
        Self::from_json(BUILTIN_JSON, CANVAS)
    }

    pub fn get(&self, index: usize) -> Option<&TargetPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_loads() {
        let set = PointSet::builtin().unwrap();
        assert_eq!(set.len(), 29);

        let first = set.get(0).unwrap();
        assert_eq!(first.pos, Vec2::new(50.0, 350.0));
        assert_eq!(first.label.as_deref(), Some("If"));

        let last = set.get(28).unwrap();
        assert_eq!(last.pos, Vec2::new(840.0, 280.0));
        assert_eq!(last.label.as_deref(), Some("You"));
    }

    #[test]
    fn builtin_message_reads_in_order() {
        let set = PointSet::builtin().unwrap();
        let words: Vec<&str> = set.iter().filter_map(|p| p.label.as_deref()).collect();
        assert_eq!(words[..6], ["If", "you", "connect", "these", "dots", "slowly"]);
        assert!(words.contains(&"♥"));
        assert_eq!(words.last(), Some(&"You"));
    }

    #[test]
    fn unlabelled_points_parse() {
        let set = PointSet::from_json(r#"[{"x": 1, "y": 2}, {"x": 3, "y": 4, "label": "hi"}]"#, CANVAS)
            .unwrap();
        assert_eq!(set.get(0).unwrap().label, None);
        assert_eq!(set.get(1).unwrap().label.as_deref(), Some("hi"));
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(PointSet::from_json("[]", CANVAS), Err(PointSetError::Empty)));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            PointSet::from_json(r#"[{"x": "left"}]"#, CANVAS),
            Err(PointSetError::Parse(_))
        ));
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let points = vec![TargetPoint::new(10.0, 10.0), TargetPoint::new(f32::NAN, 10.0)];
        assert!(matches!(
            PointSet::new(points, CANVAS),
            Err(PointSetError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn point_outside_canvas_is_rejected() {
        let points = vec![TargetPoint::new(950.0, 10.0).with_label("far")];
        let err = PointSet::new(points, CANVAS).unwrap_err();
        assert!(matches!(err, PointSetError::OutOfCanvas { index: 0, .. }));
        assert_eq!(err.to_string(), "point 0 at (950, 10) lies outside the canvas");
    }
}
