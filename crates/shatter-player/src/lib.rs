//! Shatter Player — runs the shattering text demo
//!
//! This crate provides the `ShatterApp` application handler for the windowed
//! demo, the layered `ShatterConfig`, scene construction and a headless
//! single-frame screenshot path.

pub mod config;
mod scene;
mod screenshot;
mod shatter_app;

pub use config::ShatterConfig;
pub use scene::ShatterScene;
pub use screenshot::render_screenshot;
pub use shatter_app::ShatterApp;
