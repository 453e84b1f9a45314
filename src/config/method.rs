//! Numerical method selection: order, limiters, source splitting, and
//! per-side boundary condition codes.

use crate::error::ConfigError;

/// Wave limiter applied to one wave family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limiter {
    /// No limiting.
    None,
    /// Minmod.
    Minmod,
    /// Superbee.
    Superbee,
    /// Van Leer.
    VanLeer,
    /// Monotonized central-difference.
    MonotonizedCentral,
}

impl Limiter {
    /// The engine's limiter selector code.
    pub fn code(&self) -> i64 {
        match self {
            Limiter::None => 0,
            Limiter::Minmod => 1,
            Limiter::Superbee => 2,
            Limiter::VanLeer => 3,
            Limiter::MonotonizedCentral => 4,
        }
    }
}

/// Operator splitting used for source terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceSplitting {
    /// Source routine never called.
    None,
    /// First-order Godunov splitting.
    Godunov,
    /// Second-order Strang splitting.
    Strang,
}

impl SourceSplitting {
    /// The engine's `src_split` code.
    pub fn code(&self) -> i64 {
        match self {
            SourceSplitting::None => 0,
            SourceSplitting::Godunov => 1,
            SourceSplitting::Strang => 2,
        }
    }
}

/// Boundary condition applied along one domain side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// User-supplied boundary routine.
    Custom,
    /// Zero-order extrapolation (non-reflecting outflow).
    Extrapolation,
    /// Periodic; must be paired on the opposing side.
    Periodic,
    /// Solid wall (normal momentum reflected).
    SolidWall,
}

impl BoundaryKind {
    /// The engine's boundary selector code.
    pub fn code(&self) -> i64 {
        match self {
            BoundaryKind::Custom => 0,
            BoundaryKind::Extrapolation => 1,
            BoundaryKind::Periodic => 2,
            BoundaryKind::SolidWall => 3,
        }
    }
}

/// Boundary codes with named fields for each domain side.
///
/// Named fields instead of an index convention, so west/east and
/// south/north cannot be swapped silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainSides {
    /// x = x_min boundary
    pub west: BoundaryKind,
    /// x = x_max boundary
    pub east: BoundaryKind,
    /// y = y_min boundary
    pub south: BoundaryKind,
    /// y = y_max boundary
    pub north: BoundaryKind,
}

impl DomainSides {
    /// Same boundary kind on all four sides.
    pub fn uniform(kind: BoundaryKind) -> Self {
        Self {
            west: kind,
            east: kind,
            south: kind,
            north: kind,
        }
    }

    /// Check that periodic codes come in opposing pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pairs = [
            ("west", self.west, "east", self.east),
            ("east", self.east, "west", self.west),
            ("south", self.south, "north", self.north),
            ("north", self.north, "south", self.south),
        ];
        for (side, kind, opposite, other) in pairs {
            if kind == BoundaryKind::Periodic && other != BoundaryKind::Periodic {
                return Err(ConfigError::UnpairedPeriodicBoundary { side, opposite });
            }
        }
        Ok(())
    }
}

impl Default for DomainSides {
    fn default() -> Self {
        Self::uniform(BoundaryKind::Extrapolation)
    }
}

/// Numerical method selection for the wave-propagation engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    /// Order of accuracy: 1 is Godunov, 2 adds limited corrections.
    pub order: usize,
    /// Transverse order for 2D propagation.
    pub transverse_order: usize,
    /// Number of waves in the Riemann solution.
    pub wave_count: usize,
    /// One limiter per wave family; length must equal `wave_count`.
    pub limiters: Vec<Limiter>,
    /// Source term splitting.
    pub source_splitting: SourceSplitting,
    /// Ghost cell count at each boundary.
    pub ghost_cells: usize,
}

impl Method {
    /// Second-order method with the same limiter on every wave family.
    pub fn second_order(wave_count: usize, limiter: Limiter) -> Self {
        Self {
            order: 2,
            transverse_order: 2,
            wave_count,
            limiters: vec![limiter; wave_count],
            source_splitting: SourceSplitting::Godunov,
            ghost_cells: 2,
        }
    }

    /// Check that each wave family has exactly one limiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthMismatch`] when the limiter list and
    /// wave count disagree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limiters.len() != self.wave_count {
            return Err(ConfigError::LengthMismatch {
                name: "limiters",
                expected: self.wave_count,
                actual: self.limiters.len(),
            });
        }
        Ok(())
    }

    /// Limiter codes in wave-family order.
    pub fn limiter_codes(&self) -> Vec<i64> {
        self.limiters.iter().map(Limiter::code).collect()
    }
}
