//! World-to-screen camera for the 2D simulation
//!
//! The camera is a pan offset plus a clamped zoom factor over an unbounded
//! world plane. Screen coordinates are pixels with the origin at the top-left
//! corner, y growing downwards; world coordinates are arbitrary f64 units.

use glam::DVec2;
use winit::dpi::PhysicalSize;

/// Smallest zoom the camera accepts; writes below this are clamped.
pub const MIN_ZOOM: f64 = 0.0005;
/// Largest zoom the camera accepts; writes above this are clamped.
pub const MAX_ZOOM: f64 = 100.0;

/// Visible screen rectangle, in pixels.
///
/// Owned by the camera and refreshed from the window on every resize.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub center: DVec2,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: DVec2::new(width / 2.0, height / 2.0),
        }
    }

    pub fn from_physical(size: PhysicalSize<u32>) -> Self {
        Self::new(f64::from(size.width), f64::from(size.height))
    }

    /// True iff the point lies inside the screen rectangle (edges included).
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space pan offset, mutated freely by input handling.
    pub position: DVec2,
    zoom: f64,
    viewport: Viewport,
}

impl Camera {
    pub fn new(zoom: f64, viewport: Viewport) -> Self {
        Self {
            position: DVec2::ZERO,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            viewport,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, silently clamping into `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Project a world point to screen pixels.
    pub fn world_to_screen(&self, point: DVec2) -> DVec2 {
        (point + self.position) * self.zoom + self.viewport.center
    }

    /// Unproject screen pixels back to a world point.
    ///
    /// Exact inverse of [`world_to_screen`](Self::world_to_screen) for the
    /// same position/zoom snapshot.
    pub fn screen_to_world(&self, point: DVec2) -> DVec2 {
        (point - self.viewport.center) * (1.0 / self.zoom) - self.position
    }

    /// Is a screen-space point inside the viewport?
    pub fn in_screen(&self, point: DVec2) -> bool {
        self.viewport.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        let mut camera = Camera::new(0.5, Viewport::new(800.0, 600.0));
        camera.position = DVec2::new(120.0, -340.0);
        camera
    }

    #[test]
    fn world_to_screen_known_point() {
        let camera = test_camera();
        let p = camera.world_to_screen(DVec2::new(80.0, 340.0));
        // (80 + 120) * 0.5 + 400, (340 - 340) * 0.5 + 300
        assert_eq!(p, DVec2::new(500.0, 300.0));
    }

    #[test]
    fn screen_world_round_trip() {
        let camera = test_camera();
        for point in [
            DVec2::ZERO,
            DVec2::new(1e6, -2.5e5),
            DVec2::new(-0.25, 13.75),
        ] {
            let back = camera.screen_to_world(camera.world_to_screen(point));
            assert!((back - point).length() < 1e-6, "{point} -> {back}");
        }
    }

    #[test]
    fn zoom_is_clamped_on_every_write() {
        let mut camera = test_camera();

        camera.set_zoom(1000.0);
        assert_eq!(camera.zoom(), 100.0);

        camera.set_zoom(0.0);
        assert_eq!(camera.zoom(), 0.0005);

        camera.set_zoom(3.0);
        assert_eq!(camera.zoom(), 3.0);

        assert_eq!(Camera::new(-5.0, Viewport::new(10.0, 10.0)).zoom(), 0.0005);
    }

    #[test]
    fn in_screen_includes_edges() {
        let camera = test_camera();
        assert!(camera.in_screen(DVec2::new(0.0, 0.0)));
        assert!(camera.in_screen(DVec2::new(800.0, 600.0)));
        assert!(!camera.in_screen(DVec2::new(-0.001, 10.0)));
        assert!(!camera.in_screen(DVec2::new(10.0, 600.001)));
    }
}
