//! Output scheduling policies.
//!
//! The engine writes one solution frame per scheduled output time. Three
//! policies are supported, mirroring the engine's `outstyle` selector:
//! evenly spaced frames over a simulated-hours window, an explicit list of
//! output times, or a fixed step interval.

use crate::error::ConfigError;

/// Seconds per simulated hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Policy governing when the engine writes solution frames.
///
/// # Example
///
/// ```
/// use surgerun::config::OutputSchedule;
///
/// // 40 simulated hours, one frame every quarter hour, plus the frames
/// // that fall inside a 12 h ramp-up lead-in.
/// let schedule = OutputSchedule::EvenSpacing {
///     hours: 40.0,
///     cadence: 0.25,
/// };
/// assert_eq!(schedule.frame_count(12.0 * 3600.0), Some(208));
/// assert_eq!(schedule.final_time(), Some(144_000.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum OutputSchedule {
    /// Evenly spaced frames: `hours` of simulated time past ramp-up, one
    /// frame every `cadence` hours.
    EvenSpacing {
        /// Simulated hours after the end of ramp-up.
        hours: f64,
        /// Fraction of an hour between frames (0.25 = every 15 minutes).
        cadence: f64,
    },
    /// Caller-supplied output times (s), strictly ascending.
    ExplicitTimes(Vec<f64>),
    /// One frame every `steps_between` time steps, for `total_steps` steps.
    /// The engine derives frame times from step counts; no frame count is
    /// precomputed here.
    StepInterval {
        /// Steps between consecutive frames.
        steps_between: usize,
        /// Total number of time steps to take.
        total_steps: usize,
    },
}

impl OutputSchedule {
    /// The engine's `outstyle` selector code.
    pub fn style_code(&self) -> i64 {
        match self {
            OutputSchedule::EvenSpacing { .. } => 1,
            OutputSchedule::ExplicitTimes(_) => 2,
            OutputSchedule::StepInterval { .. } => 3,
        }
    }

    /// Number of frames the engine will produce, where that is knowable.
    ///
    /// For even spacing the count covers the simulated-hours window plus
    /// every cadence interval that falls inside the ramp-up lead-in, so the
    /// "hours to simulate" semantic stays anchored to post-ramp-up time.
    /// Step-interval scheduling returns `None`: the engine derives frames
    /// from step counts directly.
    pub fn frame_count(&self, ramp_up: f64) -> Option<usize> {
        match self {
            OutputSchedule::EvenSpacing { hours, cadence } => {
                let post_ramp = (hours / cadence).floor() as usize;
                let during_ramp = (ramp_up / (cadence * SECONDS_PER_HOUR)).ceil() as usize;
                Some(post_ramp + during_ramp)
            }
            OutputSchedule::ExplicitTimes(times) => Some(times.len()),
            OutputSchedule::StepInterval { .. } => None,
        }
    }

    /// Final simulated time (s), where the schedule determines it.
    pub fn final_time(&self) -> Option<f64> {
        match self {
            OutputSchedule::EvenSpacing { hours, .. } => Some(hours * SECONDS_PER_HOUR),
            OutputSchedule::ExplicitTimes(times) => times.last().copied(),
            OutputSchedule::StepInterval { .. } => None,
        }
    }

    /// Check the schedule's internal invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] for a non-positive window,
    /// cadence, or step count, and
    /// [`ConfigError::NonAscendingOutputTimes`] when an explicit time
    /// sequence fails to increase strictly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            OutputSchedule::EvenSpacing { hours, cadence } => {
                if *hours <= 0.0 {
                    return Err(ConfigError::NonPositive {
                        name: "output window hours",
                        value: *hours,
                    });
                }
                if *cadence <= 0.0 {
                    return Err(ConfigError::NonPositive {
                        name: "output cadence",
                        value: *cadence,
                    });
                }
                Ok(())
            }
            OutputSchedule::ExplicitTimes(times) => {
                if times.is_empty() {
                    return Err(ConfigError::NonPositive {
                        name: "output time count",
                        value: 0.0,
                    });
                }
                for (i, pair) in times.windows(2).enumerate() {
                    if pair[1] <= pair[0] {
                        return Err(ConfigError::NonAscendingOutputTimes {
                            index: i + 1,
                            value: pair[1],
                        });
                    }
                }
                Ok(())
            }
            OutputSchedule::StepInterval {
                steps_between,
                total_steps,
            } => {
                if *steps_between == 0 {
                    return Err(ConfigError::NonPositive {
                        name: "steps between outputs",
                        value: 0.0,
                    });
                }
                if *total_steps == 0 {
                    return Err(ConfigError::NonPositive {
                        name: "total steps",
                        value: 0.0,
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_spacing_frame_count() {
        let schedule = OutputSchedule::EvenSpacing {
            hours: 40.0,
            cadence: 0.25,
        };
        // 160 frames over 40 h, 48 more over the 12 h ramp-up
        assert_eq!(schedule.frame_count(12.0 * 3600.0), Some(208));
        assert_eq!(schedule.frame_count(0.0), Some(160));
        assert_eq!(schedule.final_time(), Some(144_000.0));
    }

    #[test]
    fn test_frame_count_monotone_in_hours_and_ramp_up() {
        let count = |hours: f64, ramp_up: f64| {
            OutputSchedule::EvenSpacing {
                hours,
                cadence: 0.25,
            }
            .frame_count(ramp_up)
            .unwrap()
        };
        let mut prev = 0;
        for h in 1..=48 {
            let n = count(h as f64, 0.0);
            assert!(n >= prev);
            prev = n;
        }
        prev = 0;
        for r in 0..=24 {
            let n = count(40.0, r as f64 * 1800.0);
            assert!(n >= prev);
            prev = n;
        }
    }

    #[test]
    fn test_partial_ramp_up_interval_rounds_up() {
        let schedule = OutputSchedule::EvenSpacing {
            hours: 1.0,
            cadence: 0.5,
        };
        // 100 s of ramp-up still gets one frame
        assert_eq!(schedule.frame_count(100.0), Some(3));
    }

    #[test]
    fn test_explicit_times() {
        let schedule =
            OutputSchedule::ExplicitTimes(vec![0.0, 3600.0, 7200.0, 10_800.0, 14_400.0]);
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.frame_count(0.0), Some(5));
        assert_eq!(schedule.final_time(), Some(14_400.0));
    }

    #[test]
    fn test_non_ascending_times_rejected() {
        let schedule = OutputSchedule::ExplicitTimes(vec![0.0, 3600.0, 3600.0]);
        let err = schedule.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonAscendingOutputTimes { index: 2, .. }
        ));
    }

    #[test]
    fn test_step_interval_has_no_precomputed_frames() {
        let schedule = OutputSchedule::StepInterval {
            steps_between: 1,
            total_steps: 100,
        };
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.frame_count(0.0), None);
        assert_eq!(schedule.final_time(), None);
    }

    #[test]
    fn test_style_codes() {
        assert_eq!(
            OutputSchedule::EvenSpacing {
                hours: 1.0,
                cadence: 1.0
            }
            .style_code(),
            1
        );
        assert_eq!(OutputSchedule::ExplicitTimes(vec![0.0]).style_code(), 2);
        assert_eq!(
            OutputSchedule::StepInterval {
                steps_between: 1,
                total_steps: 1
            }
            .style_code(),
            3
        );
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let schedule = OutputSchedule::EvenSpacing {
            hours: 40.0,
            cadence: 0.0,
        };
        assert!(schedule.validate().is_err());
    }
}
