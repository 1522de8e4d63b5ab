//! Interactive 2D gravitational sandbox
//!
//! Circular bodies attract each other under a simplified Newtonian law,
//! overlap, and merge; a pan/zoom camera maps the unbounded world plane onto
//! the screen. Physics runs on a fixed 60 Hz tick while position integration
//! and drawing follow the display refresh rate.

pub mod input;
pub mod meter;
pub mod physics;
pub mod renderer;
pub mod world;
