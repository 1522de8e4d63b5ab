//! Interactive 2D gravity sandbox
//!
//! A few hundred planets attract each other, collide, and merge while a
//! pan/zoom camera flies over the world. Physics runs at a fixed 60 Hz while
//! positions integrate and draw at display refresh.
//!
//! Controls:
//! - Arrow keys / WASD: pan (Shift: faster, Alt: slower)
//! - -/= or [/]: zoom, Scroll: zoom
//! - Right/middle drag: pan with the pointer
//! - Left click and hold: spawn a planet (radius grows with hold time)
//! - Space: pause/resume physics
//! - R: regenerate the world

use std::time::Instant;

use common::{Camera, GraphicsContext};
use glam::DVec2;
use planets::input::{Controller, InputState, MASS_PER_RADIUS};
use planets::meter::FpsMeter;
use planets::physics::Planet;
use planets::renderer::{DrawList, Renderer};
use planets::world::{GameObject, World};
use rand::Rng;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const WINDOW_TITLE: &str = "Planets";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

/// Physics cadence: 60 fixed ticks per second.
const FIXED_DT: f64 = 1.0 / 60.0;
/// Render-delta clamp so a stall does not become a position jump.
const MAX_FRAME_DT: f64 = 0.1;

const INITIAL_ZOOM: f64 = 0.003;
const GALAXY_HALF_SIZE: f64 = 500_000.0;
const PLANET_COUNT: usize = 300;
const PLANET_RADIUS: (f64, f64) = (50.0, 500.0);
const BIG_PLANET_COUNT: (usize, usize) = (3, 7);
const BIG_PLANET_RADIUS: (f64, f64) = (10_000.0, 20_000.0);

const PAN_SPEED: f64 = 50.0;
const ZOOM_FACTOR: f64 = 0.01;

fn random_position(rng: &mut impl Rng) -> DVec2 {
    DVec2::new(
        rng.gen_range(-GALAXY_HALF_SIZE..GALAXY_HALF_SIZE),
        rng.gen_range(-GALAXY_HALF_SIZE..GALAXY_HALF_SIZE),
    )
}

/// Scatter the galaxy and wire up the overlay and input controller.
fn populate(world: &mut World) {
    let mut rng = rand::thread_rng();

    let big_count = rng.gen_range(BIG_PLANET_COUNT.0..=BIG_PLANET_COUNT.1);
    for _ in 0..big_count {
        let radius = rng.gen_range(BIG_PLANET_RADIUS.0..BIG_PLANET_RADIUS.1);
        world.add(GameObject::Planet(Planet::new(
            random_position(&mut rng),
            radius,
            radius * MASS_PER_RADIUS,
        )));
    }
    for _ in 0..PLANET_COUNT {
        let radius = rng.gen_range(PLANET_RADIUS.0..PLANET_RADIUS.1);
        world.add(GameObject::Planet(Planet::new(
            random_position(&mut rng),
            radius,
            radius * MASS_PER_RADIUS,
        )));
    }

    world.add(GameObject::FpsMeter(FpsMeter::new()));
    world.add(GameObject::Controller(Controller::new(
        PAN_SPEED,
        ZOOM_FACTOR,
    )));

    log::info!(
        "world populated: {} planets ({} large)",
        big_count + PLANET_COUNT,
        big_count
    );
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    world: World,
    camera: Camera,
    input: InputState,
    draw: DrawList,
    paused: bool,
    accumulator: f64,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = Renderer::new(&ctx);
        let camera = Camera::new(INITIAL_ZOOM, ctx.viewport());

        let mut world = World::new();
        populate(&mut world);
        world.start_all();

        Self {
            ctx,
            renderer,
            world,
            camera,
            input: InputState::default(),
            draw: DrawList::new(),
            paused: false,
            accumulator: 0.0,
        }
    }

    fn reset(&mut self) {
        self.world = World::new();
        populate(&mut self.world);
        self.world.start_all();
        self.camera = Camera::new(INITIAL_ZOOM, self.ctx.viewport());
        self.accumulator = 0.0;
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.set_viewport(self.ctx.viewport());
    }

    /// One cooperative frame: catch up on fixed physics ticks, then run the
    /// render tick and draw.
    fn frame(&mut self, dt: f64) -> Result<(), wgpu::SurfaceError> {
        if !self.paused {
            self.accumulator += dt;
            while self.accumulator >= FIXED_DT {
                self.world.fixed_tick(FIXED_DT);
                self.accumulator -= FIXED_DT;
            }
        }

        self.draw.clear();
        self.world.render_tick(
            dt,
            self.paused,
            &mut self.camera,
            &mut self.input,
            &mut self.draw,
        );

        if let Some(hud) = self.draw.hud() {
            let state = if self.paused { " [paused]" } else { "" };
            self.ctx
                .window
                .set_title(&format!("{WINDOW_TITLE} - {hud}{state}"));
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .prepare(&self.ctx.queue, &self.ctx.viewport(), &self.draw);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.renderer.render(&mut encoder, &view);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::Space if pressed => self.paused = !self.paused,
            KeyCode::KeyR if pressed => self.reset(),
            KeyCode::ArrowUp | KeyCode::KeyW => self.input.pan_up = pressed,
            KeyCode::ArrowDown | KeyCode::KeyS => self.input.pan_down = pressed,
            KeyCode::ArrowLeft | KeyCode::KeyA => self.input.pan_left = pressed,
            KeyCode::ArrowRight | KeyCode::KeyD => self.input.pan_right = pressed,
            KeyCode::Minus | KeyCode::NumpadSubtract | KeyCode::BracketLeft => {
                self.input.zoom_out = pressed
            }
            KeyCode::Equal | KeyCode::NumpadAdd | KeyCode::BracketRight => {
                self.input.zoom_in = pressed
            }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.input.fast = pressed,
            KeyCode::AltLeft | KeyCode::AltRight => self.input.slow = pressed,
            _ => {}
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => {
                if pressed {
                    self.input.begin_press();
                } else {
                    self.input.end_press();
                }
            }
            MouseButton::Right | MouseButton::Middle => self.input.dragging = pressed,
            _ => {}
        }
    }
}

fn main() {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        WINDOW_TITLE,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    ));

    let mut app = App::new(ctx);
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(size),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => app.handle_key(key, state),
                    WindowEvent::MouseInput { button, state, .. } => {
                        app.handle_mouse_button(button, state)
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        app.input.pointer_moved(DVec2::new(position.x, position.y));
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let steps = match delta {
                            MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                            MouseScrollDelta::PixelDelta(pos) => pos.y / 100.0,
                        };
                        app.input.wheel_steps += steps;
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let dt = (now - last_frame).as_secs_f64().min(MAX_FRAME_DT);
                        last_frame = now;

                        match app.frame(dt) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                app.resize(app.ctx.size)
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => log::warn!("render error: {e:?}"),
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
