//! Storm forcing configuration.
//!
//! Independent of the numerical and geophysical configurations; describes
//! the atmospheric forcing the engine applies as wind and pressure source
//! terms. Only the idealized-track Holland storm carries derivation logic;
//! other storm kinds are identified by their selector and configured
//! through files the engine reads itself.

use crate::error::ConfigError;
use crate::io::{DataFile, Value};

/// Air density at sea level (kg/m³).
pub const RHO_AIR: f64 = 1.15;

/// Nominal ambient atmospheric pressure (Pa).
pub const AMBIENT_PRESSURE: f64 = 101.5e3;

/// Pascals per millibar.
pub const MBAR_TO_PA: f64 = 100.0;

/// Convert a pressure in millibars to pascals.
///
/// ```
/// use surgerun::config::mbar_to_pascal;
/// assert_eq!(mbar_to_pascal(950.0), 95_000.0);
/// ```
pub fn mbar_to_pascal(mbar: f64) -> f64 {
    mbar * MBAR_TO_PA
}

/// Storm model selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StormKind {
    /// Track and intensity read from a parametric storm file.
    ParametricFile,
    /// Idealized storm: straight-line track, Holland pressure profile.
    Idealized,
    /// Best-track observational data file.
    BestTrack,
}

impl StormKind {
    /// The engine's storm type code.
    pub fn code(&self) -> i64 {
        match self {
            StormKind::ParametricFile => 1,
            StormKind::Idealized => 2,
            StormKind::BestTrack => 3,
        }
    }
}

/// Storm forcing configuration.
///
/// # Example
///
/// ```
/// use surgerun::config::StormConfig;
///
/// let storm = StormConfig::idealized(12.0 * 3600.0)
///     .with_track(5.0, 0.0)
///     .with_central_pressure_mbar(950.0);
/// assert_eq!(storm.central_pressure, 95_000.0);
/// assert_eq!(storm.velocity, (5.0, 0.0));
/// assert!(storm.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StormConfig {
    /// Air density (kg/m³).
    pub rho_air: f64,
    /// Ambient atmospheric pressure (Pa).
    pub ambient_pressure: f64,
    /// Apply the wind stress source term.
    pub wind_forcing: bool,
    /// Apply the pressure gradient source term.
    pub pressure_forcing: bool,
    /// Wind speed (m/s) below which the wind source term is skipped.
    pub wind_tolerance: f64,
    /// Pressure deviation (Pa) below which the pressure term is skipped.
    pub pressure_tolerance: f64,
    /// Wind speed (m/s) that triggers refinement, one entry per trigger
    /// level.
    pub wind_refine: Vec<f64>,
    /// Distance to the eye (m) that triggers refinement; parallel to
    /// `wind_refine`.
    pub radius_refine: Vec<f64>,
    /// Storm model selector.
    pub kind: StormKind,
    /// Forcing ramp-up duration (s); shared with the numerical
    /// configuration's start time.
    pub ramp_up_t: f64,
    /// Translation velocity of the eye (m/s).
    pub velocity: (f64, f64),
    /// Initial eye position (m).
    pub eye_position: (f64, f64),
    /// Holland profile parameter A.
    pub holland_a: f64,
    /// Holland profile parameter B.
    pub holland_b: f64,
    /// Central pressure (Pa).
    pub central_pressure: f64,
}

impl StormConfig {
    /// Idealized Holland storm with both forcings enabled and a stationary
    /// eye at the origin.
    pub fn idealized(ramp_up: f64) -> Self {
        Self {
            rho_air: RHO_AIR,
            ambient_pressure: AMBIENT_PRESSURE,
            wind_forcing: true,
            pressure_forcing: true,
            wind_tolerance: 1e-6,
            pressure_tolerance: 1e-4,
            wind_refine: vec![20.0, 40.0, 60.0],
            radius_refine: vec![60e3, 40e3, 20e3],
            kind: StormKind::Idealized,
            ramp_up_t: ramp_up,
            velocity: (0.0, 0.0),
            eye_position: (0.0, 0.0),
            holland_a: 23.0,
            holland_b: 1.5,
            central_pressure: mbar_to_pascal(950.0),
        }
    }

    /// Set the track from a scalar speed (m/s) and heading (radians,
    /// counterclockwise from +x).
    pub fn with_track(mut self, speed: f64, heading: f64) -> Self {
        self.velocity = (speed * heading.cos(), speed * heading.sin());
        self
    }

    /// Set the central pressure from a value in millibars.
    pub fn with_central_pressure_mbar(mut self, mbar: f64) -> Self {
        self.central_pressure = mbar_to_pascal(mbar);
        self
    }

    /// Check the refinement threshold shape and physical positivity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthMismatch`] when the wind and radius
    /// threshold lists disagree in length, and [`ConfigError::NonPositive`]
    /// for a non-positive density or pressure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wind_refine.len() != self.radius_refine.len() {
            return Err(ConfigError::LengthMismatch {
                name: "radius_refine",
                expected: self.wind_refine.len(),
                actual: self.radius_refine.len(),
            });
        }
        if self.rho_air <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "rho_air",
                value: self.rho_air,
            });
        }
        if self.ambient_pressure <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "ambient_pressure",
                value: self.ambient_pressure,
            });
        }
        if self.central_pressure <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "central_pressure",
                value: self.central_pressure,
            });
        }
        Ok(())
    }

    /// Emit the storm data file consumed by the engine.
    pub fn records(&self) -> DataFile {
        let mut file = DataFile::new();
        file.push("rho_air", Value::Float(self.rho_air));
        file.push("ambient_pressure", Value::Float(self.ambient_pressure));
        file.push("wind_forcing", Value::Bool(self.wind_forcing));
        file.push("pressure_forcing", Value::Bool(self.pressure_forcing));
        file.push("wind_tolerance", Value::Float(self.wind_tolerance));
        file.push("pressure_tolerance", Value::Float(self.pressure_tolerance));
        file.push("wind_refine", Value::float_list(self.wind_refine.clone()));
        file.push("R_refine", Value::float_list(self.radius_refine.clone()));
        file.push("storm_type", Value::Int(self.kind.code()));
        file.push("ramp_up_t", Value::Float(self.ramp_up_t));
        file.push(
            "velocity",
            Value::float_list(vec![self.velocity.0, self.velocity.1]),
        );
        file.push(
            "R_eye_init",
            Value::float_list(vec![self.eye_position.0, self.eye_position.1]),
        );
        file.push("A", Value::Float(self.holland_a));
        file.push("B", Value::Float(self.holland_b));
        file.push("Pc", Value::Float(self.central_pressure));
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millibar_conversion() {
        assert_eq!(mbar_to_pascal(950.0), 95_000.0);
        assert_eq!(mbar_to_pascal(1013.25), 101_325.0);
    }

    #[test]
    fn test_track_vector_from_speed_and_heading() {
        let storm = StormConfig::idealized(0.0).with_track(5.0, 0.0);
        assert_eq!(storm.velocity, (5.0, 0.0));

        let storm = StormConfig::idealized(0.0).with_track(2.0, std::f64::consts::FRAC_PI_2);
        assert!((storm.velocity.0).abs() < 1e-12);
        assert!((storm.velocity.1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_length_mismatch_rejected() {
        let mut storm = StormConfig::idealized(0.0);
        storm.radius_refine.pop();
        assert!(matches!(
            storm.validate().unwrap_err(),
            ConfigError::LengthMismatch {
                name: "radius_refine",
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_idealized_defaults_validate() {
        let storm = StormConfig::idealized(43_200.0);
        assert!(storm.validate().is_ok());
        assert_eq!(storm.kind.code(), 2);
        assert_eq!(storm.ramp_up_t, 43_200.0);
    }

    #[test]
    fn test_nonpositive_density_rejected() {
        let mut storm = StormConfig::idealized(0.0);
        storm.rho_air = 0.0;
        assert!(matches!(
            storm.validate().unwrap_err(),
            ConfigError::NonPositive { name: "rho_air", .. }
        ));
    }

    #[test]
    fn test_records_carry_track() {
        let storm = StormConfig::idealized(43_200.0)
            .with_track(5.0, 0.0)
            .with_central_pressure_mbar(950.0);
        let file = storm.records();
        assert_eq!(file.get("storm_type"), Some(&Value::Int(2)));
        assert_eq!(file.get("Pc"), Some(&Value::Float(95_000.0)));
        assert_eq!(file.get("ramp_up_t"), Some(&Value::Float(43_200.0)));
        assert_eq!(
            file.get("velocity"),
            Some(&Value::FloatList(vec![5.0, 0.0]))
        );
    }
}
