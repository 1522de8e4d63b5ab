//! Object registry and tick dispatch
//!
//! The world is an ordered registry of simulation objects with two cadences:
//! a fixed tick (gravity accumulation and collision merging) and a render
//! tick (position integration, input application, drawing). Removal during a
//! tick is tombstone-based so no live object is skipped or visited twice; the
//! registry is compacted after the pass.

use common::Camera;

use crate::input::{Controller, InputState};
use crate::meter::FpsMeter;
use crate::physics::{self, Contact, Planet};
use crate::renderer::DrawList;

/// Everything a registry object may touch during a render tick.
pub struct RenderCtx<'a> {
    /// Real seconds since the previous render tick.
    pub dt: f64,
    /// Integration delta: equal to `dt`, or zero while paused.
    pub sim_dt: f64,
    pub camera: &'a mut Camera,
    pub input: &'a mut InputState,
    pub draw: &'a mut DrawList,
    /// Objects spawned during the pass; they join the registry afterwards and
    /// are not visited in the tick that created them.
    pub spawned: &'a mut Vec<GameObject>,
}

/// The finite set of simulation object kinds.
pub enum GameObject {
    Planet(Planet),
    FpsMeter(FpsMeter),
    Controller(Controller),
}

impl GameObject {
    fn start(&mut self) {
        if let GameObject::Controller(controller) = self {
            controller.log_config();
        }
    }

    fn render_tick(&mut self, ctx: &mut RenderCtx) {
        match self {
            GameObject::Planet(planet) => planet.integrate(ctx.sim_dt),
            GameObject::FpsMeter(meter) => meter.tick(ctx.dt),
            GameObject::Controller(controller) => controller.apply(ctx),
        }
    }

    fn render(&self, camera: &Camera, draw: &mut DrawList) {
        match self {
            GameObject::Planet(planet) => planet.draw(camera, draw),
            GameObject::FpsMeter(meter) => meter.draw(draw),
            GameObject::Controller(_) => {}
        }
    }

    /// Viewport test; objects without a meaningful one always render.
    fn in_view(&self, camera: &Camera) -> bool {
        match self {
            GameObject::Planet(planet) => planet.in_view(camera),
            _ => true,
        }
    }

    fn dispose(&mut self) {
        if let GameObject::Planet(planet) = self {
            log::debug!(
                "planet absorbed: r={:.1} m={:.3e} at {}",
                planet.radius,
                planet.mass,
                planet.position
            );
        }
    }

    fn as_planet_mut(&mut self) -> Option<&mut Planet> {
        match self {
            GameObject::Planet(planet) => Some(planet),
            _ => None,
        }
    }

    pub fn as_planet(&self) -> Option<&Planet> {
        match self {
            GameObject::Planet(planet) => Some(planet),
            _ => None,
        }
    }
}

struct Entry {
    object: GameObject,
    active: bool,
    alive: bool,
}

/// Ordered, mutable collection of simulation objects.
#[derive(Default)]
pub struct World {
    entries: Vec<Entry>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object; returns its current registry index.
    pub fn add(&mut self, object: GameObject) -> usize {
        self.entries.push(Entry {
            object,
            active: true,
            alive: true,
        });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gate an object's participation in both cadences.
    pub fn set_active(&mut self, index: usize, active: bool) {
        self.entries[index].active = active;
    }

    /// Dispose and drop the object at `index` immediately. Only call between
    /// ticks; mid-tick removal goes through tombstoning instead.
    pub fn remove(&mut self, index: usize) {
        self.entries[index].object.dispose();
        self.entries[index].alive = false;
        self.compact();
    }

    /// Live planets, in registry order.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.entries
            .iter()
            .filter(|entry| entry.alive)
            .filter_map(|entry| entry.object.as_planet())
    }

    /// Run every active object's startup hook once, in registry order.
    pub fn start_all(&mut self) {
        for entry in &mut self.entries {
            if entry.active {
                entry.object.start();
            }
        }
    }

    /// One fixed physics tick: gravity accumulation and merging over every
    /// unordered pair of live, active planets.
    ///
    /// Positions are not mutated here, so every pair observes pre-tick
    /// positions. A body absorbed mid-pass is tombstoned and never revisited;
    /// the length snapshot keeps objects added during the tick out of it.
    pub fn fixed_tick(&mut self, dt: f64) {
        let n = self.entries.len();
        for i in 0..n {
            if !self.is_live_planet(i) {
                continue;
            }
            for j in (i + 1)..n {
                // i may have lost a merge earlier in this inner loop.
                if !self.is_live_planet(i) {
                    break;
                }
                if !self.is_live_planet(j) {
                    continue;
                }

                let (first, second) = pair_mut(&mut self.entries, i, j);
                let (Some(a), Some(b)) = (first.object.as_planet_mut(), second.object.as_planet_mut())
                else {
                    continue;
                };

                match physics::check_contact(a, b) {
                    Contact::None => {
                        let (dv_a, dv_b) = physics::gravity_pair(a, b, dt);
                        a.velocity += dv_a;
                        b.velocity += dv_b;
                    }
                    Contact::FirstAbsorbsSecond => {
                        physics::absorb(a, b);
                        second.object.dispose();
                        second.alive = false;
                    }
                    Contact::SecondAbsorbsFirst => {
                        physics::absorb(b, a);
                        first.object.dispose();
                        first.alive = false;
                    }
                }
            }
        }
        self.compact();
    }

    /// One render tick: per-object update (position integration, input,
    /// FPS accounting) followed by drawing for objects that pass their
    /// viewport test. Spawned objects join the registry at the end.
    pub fn render_tick(
        &mut self,
        dt: f64,
        paused: bool,
        camera: &mut Camera,
        input: &mut InputState,
        draw: &mut DrawList,
    ) {
        let sim_dt = if paused { 0.0 } else { dt };
        let mut spawned = Vec::new();
        {
            let mut ctx = RenderCtx {
                dt,
                sim_dt,
                camera,
                input,
                draw,
                spawned: &mut spawned,
            };
            for i in 0..self.entries.len() {
                let entry = &mut self.entries[i];
                if !(entry.alive && entry.active) {
                    continue;
                }
                entry.object.render_tick(&mut ctx);
                if entry.object.in_view(ctx.camera) {
                    entry.object.render(ctx.camera, ctx.draw);
                }
            }
        }
        for object in spawned {
            self.add(object);
        }
    }

    fn is_live_planet(&self, index: usize) -> bool {
        let entry = &self.entries[index];
        entry.alive && entry.active && matches!(entry.object, GameObject::Planet(_))
    }

    fn compact(&mut self) {
        self.entries.retain(|entry| entry.alive);
    }
}

/// Disjoint mutable access to two registry slots, `i < j`.
fn pair_mut(entries: &mut [Entry], i: usize, j: usize) -> (&mut Entry, &mut Entry) {
    debug_assert!(i < j);
    let (left, right) = entries.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{radius_from_volume, G};
    use common::Viewport;
    use glam::DVec2;

    const FIXED_DT: f64 = 1.0 / 60.0;

    fn planet(world: &mut World, x: f64, radius: f64, mass: f64) -> usize {
        world.add(GameObject::Planet(Planet::new(
            DVec2::new(x, 0.0),
            radius,
            mass,
        )))
    }

    fn collected(world: &World) -> Vec<Planet> {
        world.planets().copied().collect()
    }

    #[test]
    fn merge_mid_tick_does_not_skip_later_bodies() {
        let mut world = World::new();
        planet(&mut world, 0.0, 100.0, 1000.0); // heavy
        planet(&mut world, 50.0, 100.0, 10.0); // overlaps heavy, loses
        planet(&mut world, 1000.0, 1.0, 1.0); // far bystander

        world.fixed_tick(FIXED_DT);

        let planets = collected(&world);
        assert_eq!(planets.len(), 2);

        // The bystander was still processed after the removal: it picked up
        // the pull of the (already merged) heavy body at distance 1000.
        let far = planets[1];
        let expected = G * 1010.0 / (1000.0 * 1000.0) * FIXED_DT;
        assert!((far.velocity.x + expected).abs() < 1e-12, "{}", far.velocity);
        assert_eq!(far.velocity.y, 0.0);
    }

    #[test]
    fn merge_conserves_mass_and_volume() {
        let mut world = World::new();
        planet(&mut world, 0.0, 100.0, 1000.0);
        planet(&mut world, 50.0, 100.0, 10.0);

        let total_mass: f64 = world.planets().map(|p| p.mass).sum();
        let total_volume: f64 = world.planets().map(|p| p.volume()).sum();

        world.fixed_tick(FIXED_DT);

        let planets = collected(&world);
        assert_eq!(planets.len(), 1);
        assert!((planets[0].mass - total_mass).abs() < 1e-9);
        assert!((planets[0].volume() - total_volume).abs() < 1e-3);
        assert!((planets[0].radius - radius_from_volume(total_volume)).abs() < 1e-9);
    }

    #[test]
    fn registry_order_is_preserved_across_removal() {
        let mut world = World::new();
        planet(&mut world, 0.0, 100.0, 1000.0);
        planet(&mut world, 50.0, 100.0, 10.0); // merges into the first
        planet(&mut world, 10_000.0, 5.0, 7.0);
        planet(&mut world, 20_000.0, 5.0, 3.0);

        world.fixed_tick(FIXED_DT);

        let masses: Vec<f64> = world.planets().map(|p| p.mass).collect();
        assert_eq!(masses, vec![1010.0, 7.0, 3.0]);
    }

    #[test]
    fn inactive_planets_do_not_participate() {
        let mut world = World::new();
        planet(&mut world, 0.0, 1.0, 1000.0);
        let idle = planet(&mut world, 100.0, 1.0, 500.0);
        world.set_active(idle, false);

        world.fixed_tick(FIXED_DT);

        for p in world.planets() {
            assert_eq!(p.velocity, DVec2::ZERO);
        }
    }

    #[test]
    fn explicit_remove_compacts_the_registry() {
        let mut world = World::new();
        planet(&mut world, 0.0, 1.0, 1.0);
        let middle = planet(&mut world, 10.0, 1.0, 2.0);
        planet(&mut world, 20.0, 1.0, 3.0);

        world.remove(middle);

        let masses: Vec<f64> = world.planets().map(|p| p.mass).collect();
        assert_eq!(masses, vec![1.0, 3.0]);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn render_tick_integrates_positions_at_render_cadence() {
        let mut world = World::new();
        let index = planet(&mut world, 0.0, 1.0, 1.0);
        if let Some(p) = world.entries[index].object.as_planet_mut() {
            p.velocity = DVec2::new(6.0, -3.0);
        }

        let mut camera = Camera::new(1.0, Viewport::new(800.0, 600.0));
        let mut input = InputState::default();
        let mut draw = DrawList::new();
        world.render_tick(0.5, false, &mut camera, &mut input, &mut draw);

        let planets = collected(&world);
        assert_eq!(planets[0].position, DVec2::new(3.0, -1.5));
    }

    #[test]
    fn pause_freezes_integration_but_not_input() {
        let mut world = World::new();
        let index = planet(&mut world, 0.0, 1.0, 1.0);
        if let Some(p) = world.entries[index].object.as_planet_mut() {
            p.velocity = DVec2::new(6.0, -3.0);
        }
        world.add(GameObject::Controller(Controller::new(50.0, 0.01)));

        let mut camera = Camera::new(1.0, Viewport::new(800.0, 600.0));
        let mut input = InputState::default();
        input.pan_up = true;
        let mut draw = DrawList::new();
        world.render_tick(0.5, true, &mut camera, &mut input, &mut draw);

        let planets = collected(&world);
        assert_eq!(planets[0].position, DVec2::ZERO);
        assert!(camera.position.y > 0.0);
    }

    #[test]
    fn spawned_objects_join_after_the_pass() {
        use std::time::Duration;

        let mut world = World::new();
        world.add(GameObject::Controller(Controller::new(50.0, 0.01)));

        let mut camera = Camera::new(1.0, Viewport::new(800.0, 600.0));
        let mut input = InputState::default();
        input.released = Some(crate::input::Press {
            screen: DVec2::new(400.0, 300.0),
            held: Duration::from_secs(2),
        });
        let mut draw = DrawList::new();

        world.render_tick(FIXED_DT, false, &mut camera, &mut input, &mut draw);

        let planets = collected(&world);
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].radius, 200.0);
        // Screen center with zero pan unprojects to the world origin.
        assert!(planets[0].position.length() < 1e-9);
    }
}
