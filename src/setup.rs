//! Complete case assembly and data-file emission.
//!
//! A [`SurgeSetup`] bundles the three configuration objects for one run.
//! [`square_basin`] assembles the idealized square-basin storm-surge case:
//! a straight-track Holland storm crossing a rectangular basin with an
//! idealized shelf, observed by an alongshore gauge array.

use std::path::Path;

use thiserror::Error;

use crate::config::{
    AuxType, GeoConfig, Limiter, Method, OutputSchedule, Refinement, RunConfig, StormConfig,
};
use crate::error::ConfigError;
use crate::io::DataFileError;
use crate::types::{Bounds2D, GridShape};

/// The one engine this crate emits configuration for.
pub const SUPPORTED_PACKAGE: &str = "geoclaw";

/// Error type for setup assembly and emission.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A configuration invariant was violated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing a data file failed.
    #[error(transparent)]
    DataFile(#[from] DataFileError),
}

/// The three configuration objects for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SurgeSetup {
    /// Numerical configuration.
    pub run: RunConfig,
    /// Geophysical configuration.
    pub geo: GeoConfig,
    /// Storm forcing configuration.
    pub storm: StormConfig,
}

impl SurgeSetup {
    /// Check every per-object invariant and the cross-object ones.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, including
    /// [`ConfigError::RampUpMismatch`] when the numerical start time and
    /// the storm ramp-up were not derived from the same duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.geo.validate(&self.run)?;
        self.storm.validate()?;
        if self.run.start_time != -self.storm.ramp_up_t {
            return Err(ConfigError::RampUpMismatch {
                start_time: self.run.start_time,
                ramp_up_t: self.storm.ramp_up_t,
            });
        }
        Ok(())
    }

    /// Validate, then write the three data files into `dir`.
    ///
    /// Nothing is written when validation fails; the engine never sees a
    /// partial configuration.
    pub fn write_all(&self, dir: &Path) -> Result<(), SetupError> {
        self.validate()?;
        for (name, file) in [
            ("amr2ez.data", self.run.records()),
            ("setgeo.data", self.geo.records()),
            ("surge.data", self.storm.records()),
        ] {
            let path = dir.join(name);
            file.write_to(&path)?;
            println!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// Assemble the idealized square-basin storm-surge case.
///
/// `package` must name the supported engine (case-insensitive);
/// `ramp_up` seconds of forcing lead-in are threaded into both the
/// numerical start time and the storm configuration so the two cannot
/// diverge.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedPackage`] for any other package
/// identifier, before any derivation runs, and any invariant violation
/// found during final validation.
///
/// # Example
///
/// ```
/// use surgerun::setup::square_basin;
///
/// let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
/// assert_eq!(setup.run.start_time, -setup.storm.ramp_up_t);
/// assert_eq!(setup.geo.gauges.len(), 21);
/// ```
pub fn square_basin(package: &str, ramp_up: f64) -> Result<SurgeSetup, ConfigError> {
    if !package.eq_ignore_ascii_case(SUPPORTED_PACKAGE) {
        return Err(ConfigError::UnsupportedPackage {
            requested: package.to_string(),
            expected: SUPPORTED_PACKAGE,
        });
    }

    // Numerics: 700 km x 600 km basin, 10 km coarse cells, shallow-water
    // system with wind/pressure/friction aux fields.
    let mut run = RunConfig::new(
        Bounds2D::new(-200e3, 500e3, -300e3, 300e3),
        GridShape::new(70, 60),
        3,
        vec![AuxType::Center; 9],
        ramp_up,
        OutputSchedule::EvenSpacing {
            hours: 40.0,
            cadence: 0.25,
        },
    );
    run.verbosity = 2;
    run.method = Method::second_order(3, Limiter::VanLeer);
    run.refinement = Refinement::anisotropic(5, vec![2, 2, 2, 2, 2]);

    // Geophysics: mid-latitude rotating basin with the default shelf
    // profile; gauges on the 100 m isobath where the shelf meets the
    // beach, spanning the alongshore extent minus a 25 km inset.
    let mut geo = GeoConfig::default();
    geo.variable_dt_refinement_ratios = true;
    geo.coriolis = Some(45.0);
    geo.place_gauges(&run, 21, 455e3, -275e3, 275e3)?;

    // Storm: Holland vortex translating shoreward along +x at 5 m/s.
    let storm = StormConfig::idealized(ramp_up)
        .with_track(5.0, 0.0)
        .with_central_pressure_mbar(950.0);

    let setup = SurgeSetup { run, geo, storm };
    setup.validate()?;
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_package_rejected_before_derivation() {
        let err = square_basin("amrclaw", 0.0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedPackage { expected: "geoclaw", .. }
        ));
    }

    #[test]
    fn test_package_match_is_case_insensitive() {
        assert!(square_basin("GeoClaw", 0.0).is_ok());
    }

    #[test]
    fn test_ramp_up_threads_into_both_configurators() {
        let setup = square_basin("geoclaw", 43_200.0).unwrap();
        assert_eq!(setup.run.start_time, -43_200.0);
        assert_eq!(setup.storm.ramp_up_t, 43_200.0);
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_diverged_ramp_up_rejected() {
        let mut setup = square_basin("geoclaw", 43_200.0).unwrap();
        setup.storm.ramp_up_t = 0.0;
        assert!(matches!(
            setup.validate().unwrap_err(),
            ConfigError::RampUpMismatch { .. }
        ));
    }

    #[test]
    fn test_zero_ramp_up_allowed() {
        let setup = square_basin("geoclaw", 0.0).unwrap();
        assert_eq!(setup.run.start_time, 0.0);
        assert_eq!(setup.run.schedule.frame_count(setup.run.ramp_up()), Some(160));
    }
}
