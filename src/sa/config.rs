//! Cooling parameters and the built-in cooling schedules.

use super::types::Cooling;
use crate::error::{AnnealError, Result};

/// Built-in temperature decay formulas.
///
/// `k` is the 0-based step, `N` the total step count.
///
/// # References
///
/// - Inverse: Szu & Hartley (1987), fast annealing
/// - Exponential: Kirkpatrick et al. (1983), geometric cooling
/// - Linear / Quadratic: fixed-duration cooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Schedule {
    /// `T(k) = tm_max / (1 + alpha * k)`. Requires `alpha`.
    Inverse,

    /// `T(k) = tm_min + (tm_max - tm_min) * (N - k) / N`. Requires `N > 0`.
    Linear,

    /// Linear with the remaining fraction `(N - k) / N` squared. Requires `N > 0`.
    Quadratic,

    /// `T(k) = tm_max * alpha^k`. Requires `alpha`.
    Exponential,

    /// `tm_max * (E(k) / E(0))^2` where `E` is exponential decay.
    SquaredExponential,

    /// `tm_max * sqrt(E(k) / E(0))`.
    SquareRootExponential,

    /// `(tm_max - tm_min) * (E(k) + Q(k)) / (E(0) + Q(0))`, with `Q` the
    /// quadratic schedule. Requires both `alpha` and `N > 0`.
    ExponentialPlusQuadratic,
}

impl Schedule {
    /// All built-in schedules.
    pub const ALL: [Schedule; 7] = [
        Schedule::Inverse,
        Schedule::Linear,
        Schedule::Quadratic,
        Schedule::Exponential,
        Schedule::SquaredExponential,
        Schedule::SquareRootExponential,
        Schedule::ExponentialPlusQuadratic,
    ];

    /// Whether the formula depends on a decay rate.
    pub fn requires_alpha(self) -> bool {
        !matches!(self, Schedule::Linear | Schedule::Quadratic)
    }

    /// Whether the formula divides by the total step count.
    pub fn requires_steps(self) -> bool {
        matches!(
            self,
            Schedule::Linear | Schedule::Quadratic | Schedule::ExponentialPlusQuadratic
        )
    }
}

/// Parameters shared by all cooling schedules.
///
/// # Examples
///
/// ```
/// use u_anneal::sa::{CoolingConfig, CoolingSchedule, Schedule};
///
/// let config = CoolingConfig::default()
///     .with_steps(5_000)
///     .with_alpha(0.999)
///     .with_max_temperature(50.0);
/// let schedule = CoolingSchedule::new(Schedule::Exponential, config).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoolingConfig {
    /// Total number of annealing steps.
    pub steps: usize,

    /// Decay rate. Unset by default; required by the inverse and
    /// exponential-family schedules.
    pub alpha: Option<f64>,

    /// Lower temperature bound.
    pub tm_min: f64,

    /// Starting temperature.
    pub tm_max: f64,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        Self {
            steps: 1_000,
            alpha: None,
            tm_min: 0.0,
            tm_max: 100.0,
        }
    }
}

impl CoolingConfig {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.tm_min = t;
        self
    }

    pub fn with_max_temperature(mut self, t: f64) -> Self {
        self.tm_max = t;
        self
    }

    /// Validates the parameters against the needs of `schedule`.
    pub fn validate(&self, schedule: Schedule) -> Result<()> {
        let tm_max_ok = self.tm_max.is_finite() && self.tm_max > 0.0;
        let tm_min_ok = self.tm_min.is_finite() && self.tm_min >= 0.0;
        if !tm_max_ok || !tm_min_ok || self.tm_min > self.tm_max {
            return Err(AnnealError::InvalidTemperature {
                tm_min: self.tm_min,
                tm_max: self.tm_max,
            });
        }
        if let Some(alpha) = self.alpha {
            if !alpha.is_finite() || alpha < 0.0 {
                return Err(AnnealError::InvalidAlpha { alpha });
            }
        }
        if schedule.requires_alpha() && self.alpha.is_none() {
            return Err(AnnealError::MissingAlpha { schedule });
        }
        if schedule.requires_steps() && self.steps == 0 {
            return Err(AnnealError::ZeroSteps { schedule });
        }
        Ok(())
    }
}

/// A validated built-in cooling schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingSchedule {
    schedule: Schedule,
    config: CoolingConfig,
}

impl CoolingSchedule {
    /// Builds a schedule, failing if `config` lacks what `schedule` needs.
    pub fn new(schedule: Schedule, config: CoolingConfig) -> Result<Self> {
        config.validate(schedule)?;
        Ok(Self { schedule, config })
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn config(&self) -> &CoolingConfig {
        &self.config
    }

    fn alpha(&self) -> f64 {
        // Validated in `new` for every schedule that reads it.
        self.config.alpha.unwrap_or(0.0)
    }
}

impl Cooling for CoolingSchedule {
    fn cool(&self, step: usize) -> f64 {
        let c = &self.config;
        match self.schedule {
            Schedule::Inverse => inverse_cooling(step, c.tm_max, self.alpha()),
            Schedule::Linear => linear_cooling(step, c.tm_max, c.tm_min, c.steps),
            Schedule::Quadratic => quadratic_cooling(step, c.tm_max, c.tm_min, c.steps),
            Schedule::Exponential => exponential_cooling(step, c.tm_max, self.alpha()),
            Schedule::SquaredExponential => {
                let a = normalized_exponential(step, c.tm_max, self.alpha());
                c.tm_max * a * a
            }
            Schedule::SquareRootExponential => {
                let a = normalized_exponential(step, c.tm_max, self.alpha());
                c.tm_max * a.sqrt()
            }
            Schedule::ExponentialPlusQuadratic => {
                let alpha = self.alpha();
                let combined = |k| {
                    exponential_cooling(k, c.tm_max, alpha)
                        + quadratic_cooling(k, c.tm_max, c.tm_min, c.steps)
                };
                (c.tm_max - c.tm_min) * combined(step) / combined(0)
            }
        }
    }

    fn steps(&self) -> usize {
        self.config.steps
    }

    fn tm_max(&self) -> f64 {
        self.config.tm_max
    }

    fn tm_min(&self) -> f64 {
        self.config.tm_min
    }
}

/// `T(k) = tm_max / (1 + alpha * k)`.
pub fn inverse_cooling(step: usize, tm_max: f64, alpha: f64) -> f64 {
    tm_max / (1.0 + alpha * step as f64)
}

/// Linearly scaled cooling from `tm_max` at step 0 to `tm_min` at `max_steps`.
pub fn linear_cooling(step: usize, tm_max: f64, tm_min: f64, max_steps: usize) -> f64 {
    tm_min + (tm_max - tm_min) * remaining_fraction(step, max_steps)
}

/// Squared linear cooling.
pub fn quadratic_cooling(step: usize, tm_max: f64, tm_min: f64, max_steps: usize) -> f64 {
    let ds = remaining_fraction(step, max_steps);
    tm_min + (tm_max - tm_min) * (ds * ds)
}

/// `T(k) = tm_max * alpha^k`.
pub fn exponential_cooling(step: usize, tm_max: f64, alpha: f64) -> f64 {
    tm_max * alpha.powf(step as f64)
}

fn normalized_exponential(step: usize, tm_max: f64, alpha: f64) -> f64 {
    exponential_cooling(step, tm_max, alpha) / exponential_cooling(0, tm_max, alpha)
}

fn remaining_fraction(step: usize, max_steps: usize) -> f64 {
    (max_steps as f64 - step as f64) / max_steps as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config() -> CoolingConfig {
        CoolingConfig::default()
            .with_steps(100)
            .with_alpha(0.95)
            .with_min_temperature(1.0)
            .with_max_temperature(100.0)
    }

    #[test]
    fn test_default_config() {
        let config = CoolingConfig::default();
        assert_eq!(config.steps, 1_000);
        assert!(config.alpha.is_none());
        assert!(config.tm_min.abs() < 1e-15);
        assert!((config.tm_max - 100.0).abs() < 1e-10);
    }

    #[rstest]
    #[case(Schedule::Inverse)]
    #[case(Schedule::Exponential)]
    #[case(Schedule::SquaredExponential)]
    #[case(Schedule::SquareRootExponential)]
    #[case(Schedule::ExponentialPlusQuadratic)]
    fn test_missing_alpha(#[case] schedule: Schedule) {
        let err = CoolingSchedule::new(schedule, CoolingConfig::default()).unwrap_err();
        assert_eq!(err, AnnealError::MissingAlpha { schedule });
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[rstest]
    #[case(Schedule::Linear)]
    #[case(Schedule::Quadratic)]
    fn test_alpha_optional(#[case] schedule: Schedule) {
        assert!(CoolingSchedule::new(schedule, CoolingConfig::default()).is_ok());
    }

    #[rstest]
    #[case(Schedule::Linear)]
    #[case(Schedule::Quadratic)]
    #[case(Schedule::ExponentialPlusQuadratic)]
    fn test_zero_steps_rejected(#[case] schedule: Schedule) {
        let err = CoolingSchedule::new(schedule, config().with_steps(0)).unwrap_err();
        assert_eq!(err, AnnealError::ZeroSteps { schedule });
    }

    #[rstest]
    #[case(Schedule::Inverse)]
    #[case(Schedule::Exponential)]
    #[case(Schedule::SquaredExponential)]
    #[case(Schedule::SquareRootExponential)]
    fn test_zero_steps_allowed_without_division(#[case] schedule: Schedule) {
        assert!(CoolingSchedule::new(schedule, config().with_steps(0)).is_ok());
    }

    #[test]
    fn test_validate_bad_temperatures() {
        let bad = [
            config().with_max_temperature(0.0),
            config().with_max_temperature(f64::INFINITY),
            config().with_min_temperature(-1.0),
            config().with_min_temperature(200.0),
        ];
        for c in bad {
            assert!(matches!(
                c.validate(Schedule::Linear),
                Err(AnnealError::InvalidTemperature { .. })
            ));
        }

        let err = config().with_min_temperature(200.0).validate(Schedule::Linear);
        assert_eq!(
            err,
            Err(AnnealError::InvalidTemperature {
                tm_min: 200.0,
                tm_max: 100.0
            })
        );
    }

    #[test]
    fn test_validate_bad_alpha() {
        let err = config().with_alpha(-0.5).validate(Schedule::Inverse);
        assert_eq!(err, Err(AnnealError::InvalidAlpha { alpha: -0.5 }));
        assert!(config()
            .with_alpha(f64::NAN)
            .validate(Schedule::Linear)
            .is_err());
    }

    #[rstest]
    #[case(Schedule::Inverse, 100.0)]
    #[case(Schedule::Linear, 100.0)]
    #[case(Schedule::Quadratic, 100.0)]
    #[case(Schedule::Exponential, 100.0)]
    #[case(Schedule::SquaredExponential, 100.0)]
    #[case(Schedule::SquareRootExponential, 100.0)]
    #[case(Schedule::ExponentialPlusQuadratic, 99.0)]
    fn test_initial_temperature(#[case] schedule: Schedule, #[case] expected: f64) {
        let s = CoolingSchedule::new(schedule, config()).unwrap();
        assert!(
            (s.cool(0) - expected).abs() < 1e-10,
            "{schedule:?}: T(0) = {}",
            s.cool(0)
        );
    }

    #[test]
    fn test_known_values() {
        let c = config();
        let at = |schedule, k| CoolingSchedule::new(schedule, c.clone()).unwrap().cool(k);

        // 100 / (1 + 0.95 * 10)
        assert!((at(Schedule::Inverse, 10) - 100.0 / 10.5).abs() < 1e-10);
        // 1 + 99 * 0.5
        assert!((at(Schedule::Linear, 50) - 50.5).abs() < 1e-10);
        // 1 + 99 * 0.25
        assert!((at(Schedule::Quadratic, 50) - 25.75).abs() < 1e-10);
        assert!((at(Schedule::Exponential, 2) - 90.25).abs() < 1e-10);
        assert!((at(Schedule::SquaredExponential, 1) - 90.25).abs() < 1e-10);
        assert!((at(Schedule::SquareRootExponential, 2) - 95.0).abs() < 1e-10);

        // Linear reaches tm_min exactly at the final step count.
        assert!((at(Schedule::Linear, 100) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_exponential_plus_quadratic_value() {
        let s = CoolingSchedule::new(Schedule::ExponentialPlusQuadratic, config()).unwrap();
        let e = exponential_cooling(50, 100.0, 0.95);
        let q = quadratic_cooling(50, 100.0, 1.0, 100);
        let expected = 99.0 * (e + q) / 200.0;
        assert!((s.cool(50) - expected).abs() < 1e-10);
    }

    #[rstest]
    #[case(Schedule::Inverse)]
    #[case(Schedule::Linear)]
    #[case(Schedule::Quadratic)]
    #[case(Schedule::Exponential)]
    #[case(Schedule::SquaredExponential)]
    #[case(Schedule::SquareRootExponential)]
    #[case(Schedule::ExponentialPlusQuadratic)]
    fn test_non_increasing(#[case] schedule: Schedule) {
        let s = CoolingSchedule::new(schedule, config()).unwrap();
        for k in 1..s.steps() {
            assert!(
                s.cool(k) <= s.cool(k - 1) + 1e-12,
                "{schedule:?} increased at step {k}"
            );
            assert!(s.cool(k) >= 0.0);
        }
    }

    #[test]
    fn test_cool_is_idempotent() {
        for schedule in Schedule::ALL {
            let s = CoolingSchedule::new(schedule, config()).unwrap();
            assert_eq!(s.cool(37).to_bits(), s.cool(37).to_bits());
        }
    }

    #[test]
    fn test_accessors() {
        let s = CoolingSchedule::new(Schedule::Linear, config()).unwrap();
        assert_eq!(s.steps(), 100);
        assert_eq!(s.schedule(), Schedule::Linear);
        assert!((s.tm_max() - 100.0).abs() < 1e-10);
        assert!((s.tm_min() - 1.0).abs() < 1e-10);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CoolingConfig = serde_json::from_str(r#"{"alpha": 0.9}"#).unwrap();
        assert_eq!(config, CoolingConfig::default().with_alpha(0.9));
    }
}
