//! Gauge records and derived gauge placement.
//!
//! A gauge is a fixed virtual sensor the engine samples every time step
//! over an observation window. Placement here is purely geometric; the
//! engine owns the sampling.

use crate::error::ConfigError;
use crate::io::Value;
use crate::types::Bounds2D;

/// Observation end time treated as unbounded by the engine.
pub const OPEN_WINDOW_END: f64 = 1e10;

/// One fixed-location sensor with an observation window.
#[derive(Clone, Debug, PartialEq)]
pub struct Gauge {
    /// Gauge identifier, unique and increasing in placement order.
    pub id: i64,
    /// Cross-shore coordinate (m).
    pub x: f64,
    /// Alongshore coordinate (m).
    pub y: f64,
    /// Window start (s).
    pub t_start: f64,
    /// Window end (s).
    pub t_end: f64,
}

impl Gauge {
    /// Gauge at `(x, y)` observing from t = 0 with no practical end.
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            t_start: 0.0,
            t_end: OPEN_WINDOW_END,
        }
    }

    /// Restrict the observation window.
    pub fn with_window(mut self, t_start: f64, t_end: f64) -> Self {
        self.t_start = t_start;
        self.t_end = t_end;
        self
    }

    /// Check the window ordering and that the gauge sits inside the domain.
    pub fn validate(&self, bounds: &Bounds2D) -> Result<(), ConfigError> {
        if self.t_start >= self.t_end {
            return Err(ConfigError::GaugeWindow {
                id: self.id,
                t_start: self.t_start,
                t_end: self.t_end,
            });
        }
        if !bounds.contains(self.x, self.y) {
            return Err(ConfigError::GaugeOutsideDomain {
                id: self.id,
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }

    /// Wire record: `[id, x, y, t_start, t_end]`.
    pub fn wire_value(&self) -> Value {
        Value::float_list(vec![
            self.id as f64,
            self.x,
            self.y,
            self.t_start,
            self.t_end,
        ])
    }
}

/// Place `count` gauges along a fixed cross-shore line.
///
/// The alongshore span `[y_min, y_max]` is subdivided openly: gauge `i`
/// lands at `y = (y_max - y_min) / (count + 1) * (i + 1) + y_min`, so no
/// gauge sits on either span endpoint. The span is normally inset from the
/// full domain to keep sensors off region boundaries. Each placement is
/// printed as a diagnostic.
///
/// # Example
///
/// ```
/// use surgerun::config::alongshore_array;
///
/// let gauges = alongshore_array(21, 455e3, -275e3, 275e3);
/// assert_eq!(gauges.len(), 21);
/// assert_eq!(gauges[0].y, -250e3);
/// ```
pub fn alongshore_array(count: usize, cross_shore: f64, y_min: f64, y_max: f64) -> Vec<Gauge> {
    let span = y_max - y_min;
    (0..count)
        .map(|i| {
            let y = span / (count + 1) as f64 * (i + 1) as f64 + y_min;
            let gauge = Gauge::new(i as i64, cross_shore, y);
            println!(
                "Gauge {}: ({}, {}) km",
                gauge.id,
                gauge.x / 1e3,
                gauge.y / 1e3
            );
            gauge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_subdivision_spacing() {
        let gauges = alongshore_array(21, 455e3, -275e3, 275e3);
        assert_eq!(gauges.len(), 21);

        let spacing = 550e3 / 22.0;
        for (i, gauge) in gauges.iter().enumerate() {
            assert_eq!(gauge.id, i as i64);
            assert!(gauge.y > -275e3 && gauge.y < 275e3);
            let expected = -275e3 + spacing * (i + 1) as f64;
            assert!((gauge.y - expected).abs() < 1e-9);
        }
        // strictly increasing
        for pair in gauges.windows(2) {
            assert!(pair[1].y > pair[0].y);
        }
    }

    #[test]
    fn test_first_gauge_position() {
        let gauges = alongshore_array(21, 455e3, -275e3, 275e3);
        assert_eq!(gauges[0].y, -250e3);
    }

    #[test]
    fn test_single_gauge_at_span_midpoint() {
        let gauges = alongshore_array(1, 0.0, -100.0, 100.0);
        assert_eq!(gauges.len(), 1);
        assert_eq!(gauges[0].y, 0.0);
    }

    #[test]
    fn test_window_defaults_open() {
        let gauge = Gauge::new(0, 0.0, 0.0);
        assert_eq!(gauge.t_start, 0.0);
        assert_eq!(gauge.t_end, OPEN_WINDOW_END);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let bounds = Bounds2D::new(-1.0, 1.0, -1.0, 1.0);
        let gauge = Gauge::new(0, 0.0, 0.0).with_window(10.0, 5.0);
        assert!(matches!(
            gauge.validate(&bounds).unwrap_err(),
            ConfigError::GaugeWindow { id: 0, .. }
        ));
    }

    #[test]
    fn test_out_of_domain_rejected() {
        let bounds = Bounds2D::new(-1.0, 1.0, -1.0, 1.0);
        let gauge = Gauge::new(3, 2.0, 0.0);
        assert!(matches!(
            gauge.validate(&bounds).unwrap_err(),
            ConfigError::GaugeOutsideDomain { id: 3, .. }
        ));
    }
}
