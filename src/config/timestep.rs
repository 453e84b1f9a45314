//! Time-stepping control parameters.

use crate::error::ConfigError;

/// Courant-controlled time-stepping policy.
///
/// These values are passed through to the engine; the only derivation here
/// is validation. With `variable_dt` the engine picks each step from
/// `cfl_desired` and retakes any step that exceeds `cfl_max`; without it,
/// every step uses `dt_initial`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStepping {
    /// Adapt the step size to the desired Courant number.
    pub variable_dt: bool,
    /// Initial step (s); the fixed step when `variable_dt` is off.
    pub dt_initial: f64,
    /// Largest step allowed (s).
    pub dt_max: f64,
    /// Courant number the engine aims for.
    pub cfl_desired: f64,
    /// Courant number above which a step is retaken with smaller dt.
    pub cfl_max: f64,
    /// Maximum steps allowed between output times.
    pub max_steps: usize,
}

impl Default for TimeStepping {
    fn default() -> Self {
        Self {
            variable_dt: true,
            dt_initial: 0.016,
            dt_max: 1e99,
            cfl_desired: 0.75,
            cfl_max: 1.0,
            max_steps: 5000,
        }
    }
}

impl TimeStepping {
    /// Use a fixed step of `dt` seconds.
    pub fn fixed(dt: f64) -> Self {
        Self {
            variable_dt: false,
            dt_initial: dt,
            ..Default::default()
        }
    }

    /// Set the desired and maximum Courant numbers.
    pub fn with_courant(mut self, desired: f64, max: f64) -> Self {
        self.cfl_desired = desired;
        self.cfl_max = max;
        self
    }

    /// Check ordering and positivity invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CourantOrdering`] when
    /// `cfl_desired > cfl_max`, and [`ConfigError::NonPositive`] for a
    /// non-positive step size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cfl_desired > self.cfl_max {
            return Err(ConfigError::CourantOrdering {
                desired: self.cfl_desired,
                max: self.cfl_max,
            });
        }
        if self.dt_initial <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "dt_initial",
                value: self.dt_initial,
            });
        }
        if self.dt_max <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "dt_max",
                value: self.dt_max,
            });
        }
        Ok(())
    }
}
