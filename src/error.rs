//! Configuration error taxonomy.
//!
//! Every invariant violated during configuration derivation surfaces as a
//! [`ConfigError`]. Detection is eager: a malformed configuration fails
//! before anything is handed to the data-file layer, and nothing is ever
//! retried because derivation is deterministic.

use thiserror::Error;

/// Error type for configuration derivation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested base package is not the supported engine.
    #[error("unsupported package '{requested}', expected '{expected}'")]
    UnsupportedPackage {
        /// Package identifier that was requested.
        requested: String,
        /// The one identifier this crate can emit configuration for.
        expected: &'static str,
    },

    /// Two parallel sequences disagree in length.
    #[error("{name}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        /// Which sequence is malformed.
        name: &'static str,
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// An explicit output-time sequence is not strictly ascending.
    #[error("output times must be strictly ascending, but t[{index}] = {value} does not increase")]
    NonAscendingOutputTimes {
        /// Index of the offending entry.
        index: usize,
        /// Value of the offending entry.
        value: f64,
    },

    /// The desired Courant number exceeds the maximum allowed one.
    #[error("cfl_desired ({desired}) must not exceed cfl_max ({max})")]
    CourantOrdering {
        /// Target Courant number for step-size selection.
        desired: f64,
        /// Courant number above which a step is retaken.
        max: f64,
    },

    /// A scalar parameter that must be positive is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Periodic boundary codes must be paired on opposing sides.
    #[error("periodic boundary on {side} requires a periodic {opposite} boundary")]
    UnpairedPeriodicBoundary {
        /// Side carrying the periodic code.
        side: &'static str,
        /// Opposing side that lacks it.
        opposite: &'static str,
    },

    /// A registry with a single-entry capacity already holds an entry.
    #[error("{registry} registry accepts at most one entry")]
    RegistryFull {
        /// Registry name.
        registry: &'static str,
    },

    /// A gauge was placed outside the computational domain.
    #[error("gauge {id} at ({x}, {y}) lies outside the domain")]
    GaugeOutsideDomain {
        /// Gauge identifier.
        id: i64,
        /// Cross-shore coordinate (m).
        x: f64,
        /// Alongshore coordinate (m).
        y: f64,
    },

    /// A gauge observation window is empty or inverted.
    #[error("gauge {id}: window start ({t_start}) must precede end ({t_end})")]
    GaugeWindow {
        /// Gauge identifier.
        id: i64,
        /// Window start (s).
        t_start: f64,
        /// Window end (s).
        t_end: f64,
    },

    /// Gauge identifiers must be unique and strictly increasing.
    #[error("gauge ids must be strictly increasing: {id} follows {previous}")]
    GaugeOrdering {
        /// Offending identifier.
        id: i64,
        /// Identifier it was appended after.
        previous: i64,
    },

    /// The capacity-function index does not name a capacity-tagged slot.
    #[error("capacity index {index} does not name a capacity-tagged slot among {aux_count} aux variables")]
    CapacityIndex {
        /// 1-based capacity index.
        index: usize,
        /// Number of auxiliary variable slots.
        aux_count: usize,
    },

    /// A parameter names a refinement level outside the hierarchy.
    #[error("{name} refers to level {level}, but only {levels} refinement levels exist")]
    LevelOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending level.
        level: u32,
        /// Number of levels in the hierarchy.
        levels: u32,
    },

    /// The numerics and storm configurations disagree on the ramp-up
    /// duration.
    #[error("start time ({start_time}) must equal the negated storm ramp-up ({ramp_up_t})")]
    RampUpMismatch {
        /// Numerical configuration start time (s).
        start_time: f64,
        /// Storm configuration ramp-up duration (s).
        ramp_up_t: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offending_field() {
        let err = ConfigError::LengthMismatch {
            name: "limiters",
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("limiters"));
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_unsupported_package_display() {
        let err = ConfigError::UnsupportedPackage {
            requested: "amrclaw".to_string(),
            expected: "geoclaw",
        };
        assert!(err.to_string().contains("amrclaw"));
        assert!(err.to_string().contains("geoclaw"));
    }
}
