//! Planet bodies: pairwise gravity, collision merging, integration

use std::f64::consts::PI;

use common::Camera;
use glam::DVec2;

use crate::renderer::DrawList;

/// Gravitational constant (scaled for the sandbox).
pub const G: f64 = 100.0;

/// Below this separation the gravitational contribution of a pair is dropped
/// instead of dividing by (nearly) zero. Overlapping bodies merge long before
/// they get this close, so the cutoff is a numeric guard, not physics.
pub const DIST_EPS: f64 = 1e-9;

/// Slack subtracted from the touching distance before a contact counts as an
/// overlap, so bodies resting exactly edge-to-edge do not merge.
pub const CONTACT_EPS: f64 = 1e-9;

const BODY_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const VELOCITY_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// A circular gravitational body.
#[derive(Debug, Clone, Copy)]
pub struct Planet {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub mass: f64,
}

impl Planet {
    /// New stationary planet. Radius and mass must be positive; the spawning
    /// caller is responsible for that precondition.
    pub fn new(position: DVec2, radius: f64, mass: f64) -> Self {
        Self::with_velocity(position, radius, mass, DVec2::ZERO)
    }

    pub fn with_velocity(position: DVec2, radius: f64, mass: f64, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass,
        }
    }

    pub fn volume(&self) -> f64 {
        volume_from_radius(self.radius)
    }

    /// Is a world point inside this body's disk?
    pub fn contains(&self, point: DVec2) -> bool {
        point.distance(self.position) < self.radius
    }

    /// Advance the position by one render-tick worth of motion.
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Coarse visibility: a point test on the projected center. Large bodies
    /// whose center is just off-screen are intentionally skipped.
    pub fn in_view(&self, camera: &Camera) -> bool {
        camera.in_screen(camera.world_to_screen(self.position))
    }

    /// Emit the filled disk and the velocity vector line.
    pub fn draw(&self, camera: &Camera, out: &mut DrawList) {
        let center = camera.world_to_screen(self.position);
        out.circle(center, self.radius * camera.zoom(), BODY_COLOR);

        let tip = camera.world_to_screen(self.position + self.velocity);
        out.line(center, tip, VELOCITY_COLOR);
    }
}

pub fn volume_from_radius(radius: f64) -> f64 {
    0.75 * PI * radius.powi(3)
}

pub fn radius_from_volume(volume: f64) -> f64 {
    (volume / (0.75 * PI)).cbrt()
}

/// Velocity deltas for one unordered pair over one fixed tick.
///
/// The pair is evaluated once and both ends accumulate their pull from it:
/// `Δv = G * m_other / r² * dt` along the unit vector toward the other body,
/// so the two impulses cancel and total momentum is conserved. Returns zero
/// for both when the separation is degenerate.
pub fn gravity_pair(a: &Planet, b: &Planet, dt: f64) -> (DVec2, DVec2) {
    let offset = b.position - a.position;
    let r_sq = offset.length_squared();
    if r_sq < DIST_EPS * DIST_EPS {
        return (DVec2::ZERO, DVec2::ZERO);
    }
    let Some(dir) = offset.try_normalize() else {
        return (DVec2::ZERO, DVec2::ZERO);
    };

    // F = G m_a m_b / r²; each body accumulates a = F / m_self.
    let dv_a = dir * (G * b.mass / r_sq * dt);
    let dv_b = -dir * (G * a.mass / r_sq * dt);
    (dv_a, dv_b)
}

/// Outcome of a contact test between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// No overlap, or an exact mass tie (ties never merge).
    None,
    /// The first body absorbs the second.
    FirstAbsorbsSecond,
    /// The second body absorbs the first.
    SecondAbsorbsFirst,
}

/// Overlap test with the strict-heavier merge policy.
pub fn check_contact(a: &Planet, b: &Planet) -> Contact {
    let dist = a.position.distance(b.position);
    if dist >= a.radius + b.radius - CONTACT_EPS {
        return Contact::None;
    }
    if a.mass > b.mass {
        Contact::FirstAbsorbsSecond
    } else if b.mass > a.mass {
        Contact::SecondAbsorbsFirst
    } else {
        Contact::None
    }
}

/// Merge the loser into the winner: volume-additive (radius recomputed from
/// the combined volume, never summed linearly) and mass-additive.
pub fn absorb(winner: &mut Planet, loser: &Planet) {
    winner.radius = radius_from_volume(winner.volume() + loser.volume());
    winner.mass += loser.mass;
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_DT: f64 = 1.0 / 60.0;

    #[test]
    fn radius_volume_are_inverses() {
        for radius in [0.5, 20.0, 500.0, 18_000.0] {
            let back = radius_from_volume(volume_from_radius(radius));
            assert!((back - radius).abs() < 1e-9 * radius);
        }
    }

    #[test]
    fn gravity_magnitude_follows_the_law() {
        let a = Planet::new(DVec2::ZERO, 1.0, 2000.0);
        let b = Planet::new(DVec2::new(10.0, 0.0), 1.0, 500.0);

        let (dv_a, dv_b) = gravity_pair(&a, &b, FIXED_DT);

        // Δv = G * m_other / r² * dt, toward the other body.
        let expected_a = G * b.mass / 100.0 * FIXED_DT;
        let expected_b = G * a.mass / 100.0 * FIXED_DT;
        assert!((dv_a.length() - expected_a).abs() < 1e-12);
        assert!((dv_b.length() - expected_b).abs() < 1e-12);
        assert!(dv_a.x > 0.0 && dv_a.y == 0.0);
        assert!(dv_b.x < 0.0 && dv_b.y == 0.0);
    }

    #[test]
    fn gravity_conserves_momentum_per_pair() {
        let a = Planet::new(DVec2::new(-3.0, 7.0), 1.0, 123.0);
        let b = Planet::new(DVec2::new(40.0, -1.0), 1.0, 4567.0);

        let (dv_a, dv_b) = gravity_pair(&a, &b, FIXED_DT);
        let net = dv_a * a.mass + dv_b * b.mass;
        assert!(net.length() < 1e-9, "net impulse {net}");
    }

    #[test]
    fn coincident_bodies_contribute_nothing() {
        let a = Planet::new(DVec2::new(5.0, 5.0), 1.0, 100.0);
        let b = Planet::new(DVec2::new(5.0, 5.0), 1.0, 200.0);

        let (dv_a, dv_b) = gravity_pair(&a, &b, FIXED_DT);
        assert_eq!(dv_a, DVec2::ZERO);
        assert_eq!(dv_b, DVec2::ZERO);
        assert!(dv_a.x.is_finite() && dv_b.x.is_finite());
    }

    #[test]
    fn heavier_body_wins_the_contact() {
        let heavy = Planet::new(DVec2::ZERO, 10.0, 1000.0);
        let light = Planet::new(DVec2::new(15.0, 0.0), 10.0, 10.0);

        assert_eq!(check_contact(&heavy, &light), Contact::FirstAbsorbsSecond);
        assert_eq!(check_contact(&light, &heavy), Contact::SecondAbsorbsFirst);
    }

    #[test]
    fn touching_edge_to_edge_is_not_an_overlap() {
        let a = Planet::new(DVec2::ZERO, 10.0, 1000.0);
        let b = Planet::new(DVec2::new(20.0, 0.0), 10.0, 10.0);
        assert_eq!(check_contact(&a, &b), Contact::None);
    }

    #[test]
    fn equal_masses_tie_and_never_merge() {
        let a = Planet::new(DVec2::ZERO, 10.0, 500.0);
        let b = Planet::new(DVec2::new(5.0, 0.0), 10.0, 500.0);
        assert_eq!(check_contact(&a, &b), Contact::None);
    }

    #[test]
    fn merge_adds_volume_not_radius() {
        let mut winner = Planet::new(DVec2::ZERO, 10.0, 1000.0);
        let loser = Planet::new(DVec2::new(5.0, 0.0), 10.0, 100.0);

        let total_mass = winner.mass + loser.mass;
        let total_volume = winner.volume() + loser.volume();

        absorb(&mut winner, &loser);

        assert!((winner.mass - total_mass).abs() < 1e-9);
        assert!((winner.volume() - total_volume).abs() < 1e-6);
        // Equal radii: combined radius is 10 * 2^(1/3), not 20.
        let expected = 10.0 * 2.0_f64.cbrt();
        assert!((winner.radius - expected).abs() < 1e-9);
        assert!(winner.radius < 20.0);
    }

    #[test]
    fn integration_moves_along_velocity() {
        let mut p = Planet::with_velocity(DVec2::ZERO, 1.0, 1.0, DVec2::new(3.0, -4.0));
        p.integrate(0.5);
        assert_eq!(p.position, DVec2::new(1.5, -2.0));
    }

    #[test]
    fn contains_is_a_strict_disk_test() {
        let p = Planet::new(DVec2::ZERO, 10.0, 1.0);
        assert!(p.contains(DVec2::new(9.9, 0.0)));
        assert!(!p.contains(DVec2::new(10.0, 0.0)));
    }
}
