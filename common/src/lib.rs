//! Shared infrastructure for the gravitational sandbox
//!
//! This crate provides window/GPU bootstrap, the viewport and the
//! world-to-screen camera, and small 2D vector helpers used by the
//! simulation crate.

pub mod camera;
pub mod graphics;
pub mod vec;

pub use camera::{Camera, Viewport, MAX_ZOOM, MIN_ZOOM};
pub use graphics::{GraphicsContext, Vertex};
pub use vec::Vec2Ext;
