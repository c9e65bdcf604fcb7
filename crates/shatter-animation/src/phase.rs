//! Phase schedule and the per-frame tick function

use serde::{Deserialize, Serialize};
use shatter_core::{Result, ShatterError};

/// One part of the shatter cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Faces fall away along the push-out vector, amplitude 0 → 1
    PushOut,
    /// Fully shattered, amplitude held at 1
    PauseHigh,
    /// Faces return along their normals, amplitude 1 → 0
    PullIn,
    /// Reassembled, amplitude held at 0
    PauseLow,
}

impl Phase {
    /// Whether vertices move along the push-out vector (true) or their normal (false)
    pub fn is_push_out(self) -> bool {
        matches!(self, Phase::PushOut | Phase::PauseHigh)
    }
}

/// Durations (seconds) of the phases in one cycle.
///
/// The same `pause` is used after the push-out and after the pull-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSchedule {
    pub push_out: f64,
    pub pause: f64,
    pub pull_in: f64,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            push_out: 5.0,
            pause: 2.0,
            pull_in: 3.0,
        }
    }
}

impl PhaseSchedule {
    /// Create a schedule, rejecting ramps that are not strictly positive
    /// and pauses that are negative
    pub fn new(push_out: f64, pause: f64, pull_in: f64) -> Result<Self> {
        let schedule = Self {
            push_out,
            pause,
            pull_in,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("timing.push_out", self.push_out)?;
        check_positive("timing.pull_in", self.pull_in)?;
        if !(self.pause.is_finite() && self.pause >= 0.0) {
            return Err(ShatterError::BelowMinimum {
                field: "timing.pause".to_string(),
                min: 0.0,
                value: self.pause,
            });
        }
        Ok(())
    }

    /// Length of one full cycle
    pub fn cycle_duration(&self) -> f64 {
        self.push_out + self.pause + self.pull_in + self.pause
    }

    /// Phase containing `t`, where `t` is already wrapped into one cycle
    pub fn phase_at(&self, t: f64) -> Phase {
        if t < self.push_out {
            Phase::PushOut
        } else if t < self.push_out + self.pause {
            Phase::PauseHigh
        } else if t < self.push_out + self.pause + self.pull_in {
            Phase::PullIn
        } else {
            Phase::PauseLow
        }
    }

    /// Amplitude at `t` within one cycle
    fn amplitude_at(&self, phase: Phase, t: f64) -> f64 {
        match phase {
            Phase::PushOut => t / self.push_out,
            Phase::PauseHigh => 1.0,
            Phase::PullIn => {
                let pull_t = t - (self.push_out + self.pause);
                1.0 - pull_t / self.pull_in
            }
            Phase::PauseLow => 0.0,
        }
    }
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShatterError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

/// Animation state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShatterState {
    /// Displacement scale in [0, 1]
    pub amplitude: f32,
    /// Displace along the fixed push-out vector instead of the normal
    pub push_out: bool,
    pub phase: Phase,
    /// Elapsed time wrapped into the current cycle
    pub cycle_time: f64,
}

impl Default for ShatterState {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            push_out: true,
            phase: Phase::PushOut,
            cycle_time: 0.0,
        }
    }
}

/// Compute the animation state `elapsed` seconds after the cycle started.
///
/// Negative and non-finite times are treated as the start of the cycle.
pub fn tick(schedule: &PhaseSchedule, elapsed: f64) -> ShatterState {
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    let t = elapsed.rem_euclid(schedule.cycle_duration());
    let phase = schedule.phase_at(t);
    let amplitude = schedule.amplitude_at(phase, t).clamp(0.0, 1.0);

    ShatterState {
        amplitude: amplitude as f32,
        push_out: phase.is_push_out(),
        phase,
        cycle_time: t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn amp(t: f64) -> f32 {
        tick(&PhaseSchedule::default(), t).amplitude
    }

    #[test]
    fn default_cycle_is_twelve_seconds() {
        assert_eq!(PhaseSchedule::default().cycle_duration(), 12.0);
    }

    #[test]
    fn push_out_ramps_up() {
        let mut t = 0.0;
        while t < 5.0 {
            let s = tick(&PhaseSchedule::default(), t);
            assert!((s.amplitude - (t / 5.0) as f32).abs() < EPS, "t={t}");
            assert!(s.push_out);
            assert_eq!(s.phase, Phase::PushOut);
            t += 0.05;
        }
    }

    #[test]
    fn pause_high_holds_full_amplitude() {
        for t in [5.0, 5.5, 6.0, 6.99] {
            let s = tick(&PhaseSchedule::default(), t);
            assert_eq!(s.amplitude, 1.0);
            assert!(s.push_out);
            assert_eq!(s.phase, Phase::PauseHigh);
        }
    }

    #[test]
    fn pull_in_ramps_down() {
        let mut t = 7.0;
        while t < 10.0 {
            let s = tick(&PhaseSchedule::default(), t);
            let expected = 1.0 - (t - 7.0) / 3.0;
            assert!((s.amplitude - expected as f32).abs() < EPS, "t={t}");
            assert!(!s.push_out);
            assert_eq!(s.phase, Phase::PullIn);
            t += 0.05;
        }
    }

    #[test]
    fn pause_low_holds_zero() {
        for t in [10.0, 10.5, 11.0, 11.99] {
            let s = tick(&PhaseSchedule::default(), t);
            assert_eq!(s.amplitude, 0.0);
            assert!(!s.push_out);
            assert_eq!(s.phase, Phase::PauseLow);
        }
    }

    #[test]
    fn amplitude_is_periodic() {
        let mut t = 0.0;
        while t < 24.0 {
            assert!((amp(t) - amp(t + 12.0)).abs() < 1e-4, "t={t}");
            assert!((amp(t) - amp(t + 120.0)).abs() < 1e-4, "t={t}");
            t += 0.37;
        }
    }

    #[test]
    fn scenario_checkpoints() {
        let schedule = PhaseSchedule::default();
        let cases = [
            (0.0, 0.0, true),
            (2.5, 0.5, true),
            (6.0, 1.0, true),
            (8.5, 0.5, false),
            (11.0, 0.0, false),
        ];
        for (t, expected_amp, expected_out) in cases {
            let s = tick(&schedule, t);
            assert!((s.amplitude - expected_amp).abs() < EPS, "t={t}");
            assert_eq!(s.push_out, expected_out, "t={t}");
        }
    }

    #[test]
    fn wraps_at_cycle_boundary() {
        let s = tick(&PhaseSchedule::default(), 12.0);
        assert_eq!(s.phase, Phase::PushOut);
        assert_eq!(s.amplitude, 0.0);
        assert_eq!(s.cycle_time, 0.0);
    }

    #[test]
    fn negative_and_nan_elapsed_start_the_cycle() {
        let schedule = PhaseSchedule::default();
        assert_eq!(tick(&schedule, -3.0), ShatterState::default());
        assert_eq!(tick(&schedule, f64::NAN), ShatterState::default());
    }

    #[test]
    fn custom_schedule() {
        let schedule = PhaseSchedule::new(1.0, 0.5, 2.0).unwrap();
        assert_eq!(schedule.cycle_duration(), 4.0);
        assert_eq!(schedule.phase_at(1.2), Phase::PauseHigh);
        let s = tick(&schedule, 2.5);
        assert_eq!(s.phase, Phase::PullIn);
        assert!((s.amplitude - 0.5).abs() < EPS);
    }

    #[test]
    fn zero_pause_skips_holds() {
        let schedule = PhaseSchedule::new(1.0, 0.0, 1.0).unwrap();
        assert_eq!(schedule.phase_at(1.0), Phase::PullIn);
        assert_eq!(schedule.phase_at(0.5), Phase::PushOut);
    }

    #[test]
    fn rejects_degenerate_durations() {
        assert!(PhaseSchedule::new(0.0, 2.0, 3.0).is_err());
        assert!(PhaseSchedule::new(5.0, -1.0, 3.0).is_err());
        assert!(PhaseSchedule::new(5.0, 2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn pause_error_reports_inclusive_bound() {
        let err = PhaseSchedule::new(5.0, -1.0, 3.0).unwrap_err();
        assert!(matches!(err, ShatterError::BelowMinimum { min, .. } if min == 0.0));
        assert!(err.to_string().contains("timing.pause must be at least 0"));

        let err = PhaseSchedule::new(0.0, 2.0, 3.0).unwrap_err();
        assert!(matches!(err, ShatterError::NotPositive { .. }));
    }

    #[test]
    fn schedule_from_partial_toml() {
        let schedule: PhaseSchedule = toml::from_str("pull_in = 4.0").unwrap();
        assert_eq!(schedule.push_out, 5.0);
        assert_eq!(schedule.pause, 2.0);
        assert_eq!(schedule.pull_in, 4.0);
    }
}
