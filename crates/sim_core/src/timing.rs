use std::time::Duration;

use shared::error::DashboardError;

use crate::{
    entropy::{draw_unit, EntropySource},
    script::CHAOS_SCRIPT,
};

const DEFAULT_STEP_DELAY_MIN: Duration = Duration::from_millis(1500);
const DEFAULT_STEP_DELAY_MAX: Duration = Duration::from_millis(2500);
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Pacing of a chaos run. Only the delays are tunable; the narrative is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptTiming {
    pub step_delay_min: Duration,
    pub step_delay_max: Duration,
    pub settle_delay: Duration,
}

impl Default for ScriptTiming {
    fn default() -> Self {
        Self {
            step_delay_min: DEFAULT_STEP_DELAY_MIN,
            step_delay_max: DEFAULT_STEP_DELAY_MAX,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl ScriptTiming {
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.step_delay_min > self.step_delay_max {
            return Err(DashboardError::validation(format!(
                "step delay bounds inverted: min {:?} > max {:?}",
                self.step_delay_min, self.step_delay_max
            )));
        }
        Ok(())
    }

    /// Multiplies every delay by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self, DashboardError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DashboardError::validation(format!(
                "time scale must be a positive finite number, got {factor}"
            )));
        }
        let scale = |delay: Duration| {
            Duration::try_from_secs_f64(delay.as_secs_f64() * factor).map_err(|err| {
                DashboardError::validation(format!("time scale {factor} overflows delays: {err}"))
            })
        };
        let scaled = Self {
            step_delay_min: scale(self.step_delay_min)?,
            step_delay_max: scale(self.step_delay_max)?,
            settle_delay: scale(self.settle_delay)?,
        };
        scaled.validate()?;
        Ok(scaled)
    }

    pub fn step_delay(&self, entropy: &dyn EntropySource) -> Duration {
        let span = self.step_delay_max.saturating_sub(self.step_delay_min);
        self.step_delay_min + span.mul_f64(draw_unit(entropy))
    }

    pub fn min_run_duration(&self) -> Duration {
        self.step_delay_min * CHAOS_SCRIPT.len() as u32 + self.settle_delay
    }

    pub fn max_run_duration(&self) -> Duration {
        self.step_delay_max * CHAOS_SCRIPT.len() as u32 + self.settle_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl EntropySource for Fixed {
        fn unit(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn default_timing_bounds_a_run() {
        let timing = ScriptTiming::default();
        assert_eq!(timing.min_run_duration(), Duration::from_millis(13_000));
        assert_eq!(timing.max_run_duration(), Duration::from_millis(21_000));
    }

    #[test]
    fn step_delay_stays_within_bounds() {
        let timing = ScriptTiming::default();
        assert_eq!(timing.step_delay(&Fixed(0.0)), Duration::from_millis(1500));
        assert_eq!(timing.step_delay(&Fixed(1.0)), Duration::from_millis(2500));
        assert_eq!(timing.step_delay(&Fixed(0.5)), Duration::from_millis(2000));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let timing = ScriptTiming {
            step_delay_min: Duration::from_millis(10),
            step_delay_max: Duration::from_millis(5),
            settle_delay: Duration::ZERO,
        };
        let err = timing.validate().expect_err("inverted bounds");
        assert_eq!(err.code, shared::error::ErrorCode::Validation);
    }

    #[test]
    fn scaling_multiplies_every_delay() {
        let half = ScriptTiming::default().scaled(0.5).expect("scale");
        assert_eq!(half.step_delay_min, Duration::from_millis(750));
        assert_eq!(half.step_delay_max, Duration::from_millis(1250));
        assert_eq!(half.settle_delay, Duration::from_millis(500));
    }

    #[test]
    fn scaling_rejects_degenerate_factors() {
        let timing = ScriptTiming::default();
        assert!(timing.scaled(0.0).is_err());
        assert!(timing.scaled(-1.0).is_err());
        assert!(timing.scaled(f64::NAN).is_err());
        assert!(timing.scaled(f64::INFINITY).is_err());
        assert!(timing.scaled(1e300).is_err());
    }
}
