//! Input state and the camera/spawn controller
//!
//! The window event loop translates device events into named logical fields
//! on [`InputState`]; the [`Controller`] registry object consumes them once
//! per render tick. Keyboard pan/zoom scales with the frame delta and the
//! fast/slow modifiers; a held left click spawns a planet whose radius grows
//! with the press duration.

use std::time::{Duration, Instant};

use glam::DVec2;

use crate::physics::Planet;
use crate::world::{GameObject, RenderCtx};

/// Spawn radius clamp, in world units.
pub const SPAWN_RADIUS_MIN: f64 = 20.0;
pub const SPAWN_RADIUS_MAX: f64 = 500.0;
/// World units of spawn radius per millisecond of press.
const SPAWN_RADIUS_PER_MS: f64 = 0.1;

/// Mass per world unit of radius, shared with world generation.
pub const MASS_PER_RADIUS: f64 = 100_000.0;

/// A left press in progress.
#[derive(Debug, Clone, Copy)]
pub struct PressStart {
    pub screen: DVec2,
    pub at: Instant,
}

/// A completed left press, waiting to be turned into a planet.
#[derive(Debug, Clone, Copy)]
pub struct Press {
    pub screen: DVec2,
    pub held: Duration,
}

/// Logical input state, decoupled from device key codes.
#[derive(Debug, Default)]
pub struct InputState {
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    /// Shift held: pan/zoom five times faster.
    pub fast: bool,
    /// Alt held: pan/zoom five times slower.
    pub slow: bool,

    /// Pointer position in screen pixels.
    pub pointer: DVec2,
    /// Right or middle button held: pointer motion pans the camera.
    pub dragging: bool,
    /// Pixels of drag accumulated since the controller last ran.
    pub drag_delta: DVec2,
    /// Scroll steps accumulated since the controller last ran.
    pub wheel_steps: f64,

    pub press: Option<PressStart>,
    pub released: Option<Press>,
}

impl InputState {
    /// Left button went down at the current pointer position.
    pub fn begin_press(&mut self) {
        self.press = Some(PressStart {
            screen: self.pointer,
            at: Instant::now(),
        });
    }

    /// Left button came up; the press becomes a pending spawn.
    pub fn end_press(&mut self) {
        if let Some(start) = self.press.take() {
            self.released = Some(Press {
                screen: start.screen,
                held: start.at.elapsed(),
            });
        }
    }

    pub fn pointer_moved(&mut self, position: DVec2) {
        let delta = position - self.pointer;
        self.pointer = position;
        if self.dragging {
            self.drag_delta += delta;
        }
    }
}

/// Press-duration-to-radius mapping: one world unit per 10 ms, clamped.
pub fn radius_for_press(held: Duration) -> f64 {
    (held.as_secs_f64() * 1000.0 * SPAWN_RADIUS_PER_MS)
        .clamp(SPAWN_RADIUS_MIN, SPAWN_RADIUS_MAX)
}

/// Registry object applying input to the camera and spawning planets.
pub struct Controller {
    pub move_speed: f64,
    pub zoom_factor: f64,
}

impl Controller {
    pub fn new(move_speed: f64, zoom_factor: f64) -> Self {
        Self {
            move_speed,
            zoom_factor,
        }
    }

    pub(crate) fn log_config(&self) {
        log::debug!(
            "controller: move_speed={} zoom_factor={}",
            self.move_speed,
            self.zoom_factor
        );
    }

    pub fn apply(&mut self, ctx: &mut RenderCtx) {
        let dt = ctx.dt;
        let input = &mut *ctx.input;
        let camera = &mut *ctx.camera;

        let multiplier =
            (if input.fast { 5.0 } else { 1.0 }) / (if input.slow { 5.0 } else { 1.0 });
        let zoom_speed = self.zoom_factor * multiplier * dt;
        // Pan in world units, so panning covers the same screen distance at
        // any zoom level.
        let move_speed = self.move_speed * multiplier * dt / camera.zoom();

        if input.zoom_out {
            camera.set_zoom(camera.zoom() - zoom_speed);
        }
        if input.zoom_in {
            camera.set_zoom(camera.zoom() + zoom_speed);
        }
        if input.pan_up {
            camera.position.y += move_speed;
        }
        if input.pan_left {
            camera.position.x += move_speed;
        }
        if input.pan_down {
            camera.position.y -= move_speed;
        }
        if input.pan_right {
            camera.position.x -= move_speed;
        }

        let wheel = std::mem::take(&mut input.wheel_steps);
        if wheel != 0.0 {
            camera.set_zoom(camera.zoom() * (1.0 + wheel * 0.1));
        }

        let drag = std::mem::take(&mut input.drag_delta);
        if drag != DVec2::ZERO {
            camera.position += drag / camera.zoom();
        }

        if let Some(press) = input.released.take() {
            let radius = radius_for_press(press.held);
            let position = camera.screen_to_world(press.screen);
            log::debug!("spawning planet r={:.0} at {}", radius, position);
            ctx.spawned.push(GameObject::Planet(Planet::new(
                position,
                radius,
                radius * MASS_PER_RADIUS,
            )));
        }
    }
}
