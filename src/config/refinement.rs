//! Adaptive mesh refinement parameters.
//!
//! The engine refines locally by factors taken from per-level ratio lists.
//! Refinement may be isotropic (space only) or anisotropic (independent
//! ratios in x, y, and time). The mode is an explicit field here; the
//! engine's wire format encodes it as the sign of the level count, which
//! the data-file layer reapplies on emission.

use crate::error::ConfigError;

/// Whether refinement ratios apply per-axis and in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefinementMode {
    /// One spatial ratio per level.
    Isotropic,
    /// Independent x, y, and t ratios per level.
    Anisotropic,
}

/// AMR level structure and regridding controls.
#[derive(Clone, Debug, PartialEq)]
pub struct Refinement {
    /// Maximum number of refinement levels (1 = single grid).
    pub levels: u32,
    /// Isotropic or anisotropic ratio interpretation.
    pub mode: RefinementMode,
    /// Refinement ratios in x at each level; length at least `levels - 1`.
    pub ratios_x: Vec<u32>,
    /// Refinement ratios in y at each level.
    pub ratios_y: Vec<u32>,
    /// Refinement ratios in t at each level.
    pub ratios_t: Vec<u32>,
    /// Richardson error estimator tolerance; `None` disables the estimator.
    pub richardson_tolerance: Option<f64>,
    /// Tolerance used by the engine's default flagging routine.
    pub flag_tolerance: f64,
    /// Efficiency cutoff for clustering flagged cells into grids.
    pub efficiency_cutoff: f64,
    /// Regrid every this many steps.
    pub regrid_interval: usize,
    /// Buffer width around flagged cells.
    pub buffer_width: usize,
}

impl Refinement {
    /// Anisotropic refinement with the same ratio lists in x, y, and t.
    pub fn anisotropic(levels: u32, ratios: Vec<u32>) -> Self {
        Self {
            levels,
            mode: RefinementMode::Anisotropic,
            ratios_x: ratios.clone(),
            ratios_y: ratios.clone(),
            ratios_t: ratios,
            richardson_tolerance: None,
            flag_tolerance: 0.5,
            efficiency_cutoff: 0.7,
            regrid_interval: 3,
            buffer_width: 2,
        }
    }

    /// Isotropic refinement; the x ratios apply to both axes and time.
    pub fn isotropic(levels: u32, ratios: Vec<u32>) -> Self {
        let mut refinement = Self::anisotropic(levels, ratios);
        refinement.mode = RefinementMode::Isotropic;
        refinement
    }

    /// Level count with the engine's sign encoding applied
    /// (negative means anisotropic).
    pub fn signed_levels(&self) -> i64 {
        match self.mode {
            RefinementMode::Isotropic => i64::from(self.levels),
            RefinementMode::Anisotropic => -i64::from(self.levels),
        }
    }

    /// Check level count and ratio list lengths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] for a zero level count and
    /// [`ConfigError::LengthMismatch`] when any ratio list is shorter than
    /// `levels - 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels == 0 {
            return Err(ConfigError::NonPositive {
                name: "refinement levels",
                value: 0.0,
            });
        }
        let needed = (self.levels - 1) as usize;
        for (name, ratios) in [
            ("refinement ratios in x", &self.ratios_x),
            ("refinement ratios in y", &self.ratios_y),
            ("refinement ratios in t", &self.ratios_t),
        ] {
            if ratios.len() < needed {
                return Err(ConfigError::LengthMismatch {
                    name,
                    expected: needed,
                    actual: ratios.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anisotropic_sign_encoding() {
        let r = Refinement::anisotropic(5, vec![2, 2, 2, 2, 2]);
        assert_eq!(r.signed_levels(), -5);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_isotropic_sign_encoding() {
        let r = Refinement::isotropic(3, vec![4, 4]);
        assert_eq!(r.signed_levels(), 3);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_short_ratio_list_rejected() {
        let r = Refinement::anisotropic(5, vec![2, 2, 2]);
        assert!(matches!(
            r.validate().unwrap_err(),
            ConfigError::LengthMismatch {
                name: "refinement ratios in x",
                expected: 4,
                actual: 3,
            }
        ));
    }

    #[test]
    fn test_longer_ratio_list_accepted() {
        // Length may exceed levels - 1; the engine ignores the tail.
        let r = Refinement::anisotropic(5, vec![2, 2, 2, 2, 2]);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_zero_levels_rejected() {
        let r = Refinement::anisotropic(0, vec![]);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_single_level_needs_no_ratios() {
        let r = Refinement::isotropic(1, vec![]);
        assert!(r.validate().is_ok());
    }
}
