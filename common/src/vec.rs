//! 2D vector helpers on top of `glam::DVec2`
//!
//! The simulation does all of its math through `DVec2`; this module only adds
//! the rotation helpers glam does not spell out. Normalization of a zero
//! vector is the usual degenerate case: callers use `try_normalize` and treat
//! `None` as "no direction", never letting NaN into the simulation.

use glam::DVec2;

pub trait Vec2Ext {
    /// Rotate a quarter turn clockwise (screen coordinates, y down).
    fn perp_cw(self) -> Self;
    /// Rotate a quarter turn counter-clockwise.
    fn perp_ccw(self) -> Self;
}

impl Vec2Ext for DVec2 {
    fn perp_cw(self) -> Self {
        DVec2::new(self.y, -self.x)
    }

    fn perp_ccw(self) -> Self {
        DVec2::new(-self.y, self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendiculars_are_quarter_turns() {
        let v = DVec2::new(3.0, 4.0);

        assert_eq!(v.perp_cw(), DVec2::new(4.0, -3.0));
        assert_eq!(v.perp_ccw(), DVec2::new(-4.0, 3.0));

        // Both are perpendicular and length-preserving.
        assert_eq!(v.dot(v.perp_cw()), 0.0);
        assert_eq!(v.dot(v.perp_ccw()), 0.0);
        assert_eq!(v.perp_cw().length(), v.length());
    }

    #[test]
    fn perp_cw_then_ccw_is_identity() {
        let v = DVec2::new(-1.5, 2.5);
        assert_eq!(v.perp_cw().perp_ccw(), v);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(DVec2::ZERO.try_normalize().is_none());
    }

    #[test]
    fn angle_unit_vector() {
        let v = DVec2::from_angle(std::f64::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
    }
}
