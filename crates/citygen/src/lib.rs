//! Procedural layout of city blocks: building classes, recursive footprint
//! packing, and the streets and intersections that frame each block.

pub mod block;
pub mod city;
pub mod classifier;
pub mod config;
pub mod error;
pub mod packer;

pub use block::*;
pub use city::*;
pub use classifier::*;
pub use config::*;
pub use error::*;
pub use packer::*;
