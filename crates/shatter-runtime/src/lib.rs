//! Shatter Runtime - frame loop building blocks
//!
//! - `FrameClock` — wall-clock time since the animation started, sampled once per frame

mod clock;

pub use clock::FrameClock;
