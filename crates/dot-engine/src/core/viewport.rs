use glam::Vec2;

/// Maps client (CSS pixel) coordinates onto the world of a surface that
/// letterboxes the world with uniform scaling, centred on both axes
/// (SVG `preserveAspectRatio="xMidYMid meet"`).
///
/// Equivalent to inverting the element's screen CTM: `(x - e) / a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World size in game units.
    world: Vec2,
    /// Uniform world-to-client scale.
    scale: f32,
    /// Client position of the world origin.
    origin: Vec2,
}

impl Viewport {
    /// A viewport where one world unit equals one client pixel.
    pub fn identity(world: Vec2) -> Self {
        Self {
            world,
            scale: 1.0,
            origin: Vec2::ZERO,
        }
    }

    /// Fit the world into the element rectangle at `(left, top)` with the
    /// given client size.
    pub fn fit(world: Vec2, left: f32, top: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 || world.x <= 0.0 || world.y <= 0.0 {
            return Self::identity(world);
        }
        let scale = (width / world.x).min(height / world.y);
        let used = world * scale;
        let origin = Vec2::new(
            left + (width - used.x) * 0.5,
            top + (height - used.y) * 0.5,
        );
        Self { world, scale, origin }
    }

    /// Convert a client-space point to world coordinates.
    /// Points outside the letterboxed area map outside the world bounds.
    pub fn to_world(&self, client: Vec2) -> Vec2 {
        (client - self.origin) / self.scale
    }

    /// Convert a world-space point to client coordinates.
    pub fn to_client(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.origin
    }

    /// Whether a world point lies inside the world rectangle.
    pub fn contains(&self, world: Vec2) -> bool {
        world.x >= 0.0 && world.y >= 0.0 && world.x <= self.world.x && world.y <= self.world.y
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(900.0, 500.0);

    #[test]
    fn identity_is_passthrough() {
        let vp = Viewport::identity(WORLD);
        assert_eq!(vp.to_world(Vec2::new(12.0, 34.0)), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn wide_element_is_pillarboxed() {
        // 1800x500: height limits, scale 1, 450px bars left and right.
        let vp = Viewport::fit(WORLD, 0.0, 0.0, 1800.0, 500.0);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.to_world(Vec2::new(450.0, 0.0)), Vec2::ZERO);
        assert_eq!(vp.to_world(Vec2::new(900.0, 250.0)), Vec2::new(450.0, 250.0));
    }

    #[test]
    fn centre_maps_to_world_centre() {
        let vp = Viewport::fit(WORLD, 20.0, 40.0, 450.0, 600.0);
        let centre = Vec2::new(20.0 + 225.0, 40.0 + 300.0);
        let world = vp.to_world(centre);
        assert!((world - WORLD * 0.5).length() < 1e-3);
    }

    #[test]
    fn round_trip_through_client_space() {
        let vp = Viewport::fit(WORLD, 8.0, 8.0, 640.0, 480.0);
        let p = Vec2::new(123.0, 321.0);
        assert!((vp.to_world(vp.to_client(p)) - p).length() < 1e-3);
    }

    #[test]
    fn degenerate_element_falls_back_to_identity() {
        let vp = Viewport::fit(WORLD, 0.0, 0.0, 0.0, 300.0);
        assert_eq!(vp, Viewport::identity(WORLD));
    }

    #[test]
    fn letterbox_bars_are_outside_the_world() {
        let vp = Viewport::fit(WORLD, 0.0, 0.0, 1800.0, 500.0);
        assert!(!vp.contains(vp.to_world(Vec2::new(100.0, 250.0))));
        assert!(vp.contains(vp.to_world(Vec2::new(900.0, 250.0))));
    }
}
