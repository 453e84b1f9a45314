//! Coarse-grid cell counts.

use std::fmt;

/// Coarse-grid shape (number of cells in each direction).
///
/// Only the level-1 grid is specified here; finer levels are derived by the
/// engine from the refinement ratios.
///
/// # Example
///
/// ```
/// use surgerun::types::GridShape;
///
/// let grid = GridShape::new(70, 60);
/// assert_eq!(grid.mx(), 70);
/// assert_eq!(grid.my(), 60);
/// assert_eq!(grid.cell_count(), 4200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of cells in x-direction
    mx: usize,
    /// Number of cells in y-direction
    my: usize,
}

impl GridShape {
    /// Create a new grid shape.
    ///
    /// # Panics
    ///
    /// Panics if either cell count is zero.
    pub fn new(mx: usize, my: usize) -> Self {
        assert!(mx > 0, "mx must be positive, got {}", mx);
        assert!(my > 0, "my must be positive, got {}", my);
        Self { mx, my }
    }

    /// Number of cells in x-direction.
    #[inline]
    pub fn mx(&self) -> usize {
        self.mx
    }

    /// Number of cells in y-direction.
    #[inline]
    pub fn my(&self) -> usize {
        self.my
    }

    /// Total number of coarse-grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.mx * self.my
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.mx, self.my)
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((mx, my): (usize, usize)) -> Self {
        Self::new(mx, my)
    }
}
