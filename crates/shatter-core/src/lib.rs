//! Shatter Core - Foundational types for the Shatter text demo
//!
//! This crate provides the types every other Shatter crate depends on:
//! - `Vec3` - Spatial vector math for mesh building
//! - `Color` - opaque RGB colors with sRGB hex decoding
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, ShatterError};
pub use types::{mat4_mul, Color, Vec3};
