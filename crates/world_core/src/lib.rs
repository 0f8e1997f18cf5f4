//! Core spatial types shared by the city generator and the world layer.
//!
//! This crate provides:
//! - Axis-aligned ground-plane rectangles
//! - Box transforms for placing footprints in 3D world space

pub mod rect;
pub mod transform;

pub use rect::*;
pub use transform::*;
