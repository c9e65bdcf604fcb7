//! Shatter Animation - the push-out / pull-in timing cycle
//!
//! The shatter effect is driven by a single scalar `amplitude` and a
//! direction flag, both pure functions of elapsed time:
//! - `PhaseSchedule` — durations of the four phases of one cycle
//! - `Phase` — which part of the cycle a moment falls in
//! - `tick` — elapsed seconds in, `ShatterState` out

mod phase;

pub use phase::{tick, Phase, PhaseSchedule, ShatterState};
