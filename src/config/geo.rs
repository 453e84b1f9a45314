//! Geophysical configuration layered over the numerical one.
//!
//! Physical constants, friction, depth-based refinement thresholds, the
//! idealized shelf bathymetry, gauge placement, and the input registries
//! (topography, moving topography, initial perturbation, refinement
//! regions, fixed output grids). Registries are append-ordered; the engine
//! treats later entries as higher priority where they overlap.

use crate::config::gauges::{alongshore_array, Gauge};
use crate::config::run::RunConfig;
use crate::error::ConfigError;
use crate::io::{DataFile, Value};

/// Horizontal coordinate system the domain is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// Cartesian meters.
    Cartesian,
    /// Longitude/latitude degrees on the sphere.
    Spherical,
}

impl CoordinateSystem {
    /// The engine's coordinate system code.
    pub fn code(&self) -> i64 {
        match self {
            CoordinateSystem::Cartesian => 1,
            CoordinateSystem::Spherical => 2,
        }
    }
}

/// Bottom friction model parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Friction {
    /// Apply the friction source term.
    pub enabled: bool,
    /// Manning roughness coefficient.
    pub manning: f64,
    /// Depth (m) below which friction applies.
    pub depth_cutoff: f64,
}

impl Default for Friction {
    fn default() -> Self {
        Self {
            enabled: true,
            manning: 0.025,
            depth_cutoff: 1e6,
        }
    }
}

/// Idealized cross-shore bathymetry profile.
///
/// A flat basin, a continental slope rising to a shelf, and a sloping
/// beach. The engine synthesizes topography from these parameters when no
/// topography file overrides them.
#[derive(Clone, Debug, PartialEq)]
pub struct ShelfBathymetry {
    /// Topography type code handed to the engine.
    pub topo_type: i64,
    /// Cross-shore coordinate where the basin floor ends (m).
    pub basin_end: f64,
    /// Cross-shore coordinate where the slope meets the shelf (m).
    pub shelf_start: f64,
    /// Cross-shore coordinate of the shoreline (m).
    pub shoreline: f64,
    /// Basin floor elevation (m, negative below sea level).
    pub basin_depth: f64,
    /// Shelf elevation (m, negative below sea level).
    pub shelf_depth: f64,
    /// Beach slope shoreward of the shelf.
    pub beach_slope: f64,
}

impl Default for ShelfBathymetry {
    fn default() -> Self {
        Self {
            topo_type: 2,
            basin_end: 350e3,
            shelf_start: 450e3,
            shoreline: 480e3,
            basin_depth: -3000.0,
            shelf_depth: -200.0,
            beach_slope: 0.05,
        }
    }
}

/// Multi-layer constants, pass-through only.
#[derive(Clone, Debug, PartialEq)]
pub struct Multilayer {
    /// Number of layers (1 = single layer).
    pub layers: usize,
    /// Water density (kg/m³).
    pub density: f64,
    /// Initial interface elevation (m).
    pub initial_surface: f64,
    /// Richardson number stability tolerance.
    pub richardson_tolerance: f64,
}

impl Default for Multilayer {
    fn default() -> Self {
        Self {
            layers: 1,
            density: 1025.0,
            initial_surface: 0.0,
            richardson_tolerance: 0.95,
        }
    }
}

/// Topography file registry entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TopoFileEntry {
    /// Topography file format code.
    pub topo_type: i64,
    /// Coarsest AMR level forced over the file's extent.
    pub min_level: u32,
    /// Finest AMR level allowed over the file's extent.
    pub max_level: u32,
    /// Path handed verbatim to the engine.
    pub path: String,
}

impl TopoFileEntry {
    fn wire_value(&self) -> Value {
        Value::Str(format!(
            "{} {} {} {}",
            self.topo_type, self.min_level, self.max_level, self.path
        ))
    }
}

/// Moving-topography (dtopo) registry entry.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingTopoEntry {
    /// Moving-topography file format code.
    pub topo_type: i64,
    /// Coarsest AMR level forced over the file's extent.
    pub min_level: u32,
    /// Finest AMR level allowed over the file's extent.
    pub max_level: u32,
    /// Path handed verbatim to the engine.
    pub path: String,
}

impl MovingTopoEntry {
    fn wire_value(&self) -> Value {
        Value::Str(format!(
            "{} {} {} {}",
            self.topo_type, self.min_level, self.max_level, self.path
        ))
    }
}

/// Initial-condition perturbation (qinit) registry entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PerturbationEntry {
    /// Coarsest AMR level forced over the file's extent.
    pub min_level: u32,
    /// Finest AMR level allowed over the file's extent.
    pub max_level: u32,
    /// Path handed verbatim to the engine.
    pub path: String,
}

impl PerturbationEntry {
    fn wire_value(&self) -> Value {
        Value::Str(format!("{} {} {}", self.min_level, self.max_level, self.path))
    }
}

/// Refinement region registry entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionEntry {
    /// Coarsest AMR level forced inside the region.
    pub min_level: u32,
    /// Finest AMR level allowed inside the region.
    pub max_level: u32,
    /// Region active from this time (s).
    pub t_start: f64,
    /// Region active until this time (s).
    pub t_end: f64,
    /// Region extent (m).
    pub x_min: f64,
    /// Region extent (m).
    pub x_max: f64,
    /// Region extent (m).
    pub y_min: f64,
    /// Region extent (m).
    pub y_max: f64,
}

impl RegionEntry {
    fn wire_value(&self) -> Value {
        Value::float_list(vec![
            f64::from(self.min_level),
            f64::from(self.max_level),
            self.t_start,
            self.t_end,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
        ])
    }
}

/// Fixed output grid registry entry.
///
/// The engine interpolates the solution onto a fixed rectangular grid at
/// evenly spaced times, independent of the AMR hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGridEntry {
    /// First output time (s).
    pub t_start: f64,
    /// Last output time (s).
    pub t_end: f64,
    /// Number of output frames over the window.
    pub frame_count: usize,
    /// Grid extent (m).
    pub x_min: f64,
    /// Grid extent (m).
    pub x_max: f64,
    /// Grid extent (m).
    pub y_min: f64,
    /// Grid extent (m).
    pub y_max: f64,
    /// Output points in x.
    pub nx: usize,
    /// Output points in y.
    pub ny: usize,
    /// Also record first-arrival times.
    pub arrival_times: bool,
    /// Also record the running surface maximum.
    pub surface_max: bool,
}

impl FixedGridEntry {
    fn wire_value(&self) -> Value {
        Value::float_list(vec![
            self.t_start,
            self.t_end,
            self.frame_count as f64,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.nx as f64,
            self.ny as f64,
            if self.arrival_times { 1.0 } else { 0.0 },
            if self.surface_max { 1.0 } else { 0.0 },
        ])
    }
}

/// Geophysical configuration.
///
/// Defaults describe a generic mid-latitude basin; a concrete case adjusts
/// fields and fills registries before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoConfig {
    /// Let the engine pick time refinement ratios from observed wave speeds.
    pub variable_dt_refinement_ratios: bool,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Coordinate system the domain is expressed in.
    pub coordinate_system: CoordinateSystem,
    /// Earth radius (m), used in spherical coordinates and Coriolis.
    pub earth_radius: f64,
    /// Coriolis reference latitude (degrees); `None` disables the term.
    pub coriolis: Option<f64>,
    /// Depth (m) below which a cell counts as dry.
    pub dry_tolerance: f64,
    /// Sea-surface deviation (m) that flags a cell for refinement.
    pub wave_tolerance: f64,
    /// Speed threshold (m/s) that flags a cell for refinement, one entry
    /// per AMR level. Coarser levels carry larger tolerances; the engine
    /// interprets the ordering, this module only checks the shape.
    pub speed_tolerance: Vec<f64>,
    /// Water deeper than this (m) counts as deep water.
    pub deep_depth: f64,
    /// Finest level allowed in deep water.
    pub max_level_deep: u32,
    /// Bottom friction model.
    pub friction: Friction,
    /// Idealized cross-shore bathymetry profile.
    pub bathymetry: ShelfBathymetry,
    /// Topography file registry.
    pub topo_files: Vec<TopoFileEntry>,
    /// Moving-topography registry; at most one entry.
    pub moving_topo_files: Vec<MovingTopoEntry>,
    /// Initial-perturbation variable selector code; 0 = none.
    pub perturbation_type: i64,
    /// Initial-perturbation registry; at most one entry.
    pub perturbation_files: Vec<PerturbationEntry>,
    /// Refinement region registry.
    pub regions: Vec<RegionEntry>,
    /// Gauge registry, id-ordered.
    pub gauges: Vec<Gauge>,
    /// Fixed output grid registry.
    pub fixed_grids: Vec<FixedGridEntry>,
    /// Multi-layer constants.
    pub multilayer: Multilayer,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            variable_dt_refinement_ratios: false,
            gravity: 9.81,
            coordinate_system: CoordinateSystem::Cartesian,
            earth_radius: 6367.5e3,
            coriolis: None,
            dry_tolerance: 1e-2,
            wave_tolerance: 0.5,
            speed_tolerance: vec![0.25, 0.5, 1.0, 2.0, 3.0, 4.0],
            deep_depth: 200.0,
            max_level_deep: 4,
            friction: Friction::default(),
            bathymetry: ShelfBathymetry::default(),
            topo_files: Vec::new(),
            moving_topo_files: Vec::new(),
            perturbation_type: 0,
            perturbation_files: Vec::new(),
            regions: Vec::new(),
            gauges: Vec::new(),
            fixed_grids: Vec::new(),
            multilayer: Multilayer::default(),
        }
    }
}

impl GeoConfig {
    /// Append a topography file entry.
    pub fn add_topo_file(&mut self, entry: TopoFileEntry) {
        self.topo_files.push(entry);
    }

    /// Append the moving-topography entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegistryFull`] on a second append; the engine
    /// only supports a single moving-topography input.
    pub fn add_moving_topo_file(&mut self, entry: MovingTopoEntry) -> Result<(), ConfigError> {
        if !self.moving_topo_files.is_empty() {
            return Err(ConfigError::RegistryFull {
                registry: "moving topography",
            });
        }
        self.moving_topo_files.push(entry);
        Ok(())
    }

    /// Append the initial-perturbation entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegistryFull`] on a second append.
    pub fn add_perturbation_file(&mut self, entry: PerturbationEntry) -> Result<(), ConfigError> {
        if !self.perturbation_files.is_empty() {
            return Err(ConfigError::RegistryFull {
                registry: "initial perturbation",
            });
        }
        self.perturbation_files.push(entry);
        Ok(())
    }

    /// Append a refinement region.
    pub fn add_region(&mut self, entry: RegionEntry) {
        self.regions.push(entry);
    }

    /// Append a fixed output grid.
    pub fn add_fixed_grid(&mut self, entry: FixedGridEntry) {
        self.fixed_grids.push(entry);
    }

    /// Append one gauge, enforcing id ordering, window ordering, and
    /// domain containment.
    pub fn add_gauge(&mut self, run: &RunConfig, gauge: Gauge) -> Result<(), ConfigError> {
        if let Some(last) = self.gauges.last() {
            if gauge.id <= last.id {
                return Err(ConfigError::GaugeOrdering {
                    id: gauge.id,
                    previous: last.id,
                });
            }
        }
        gauge.validate(&run.bounds)?;
        self.gauges.push(gauge);
        Ok(())
    }

    /// Place `count` gauges on an alongshore line at `cross_shore`,
    /// openly subdividing `[y_min, y_max]`.
    pub fn place_gauges(
        &mut self,
        run: &RunConfig,
        count: usize,
        cross_shore: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<(), ConfigError> {
        for gauge in alongshore_array(count, cross_shore, y_min, y_max) {
            self.add_gauge(run, gauge)?;
        }
        Ok(())
    }

    /// Check every invariant against the numerical configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: speed tolerance shape, deep
    /// refinement level range, registry capacity, or a gauge invariant.
    pub fn validate(&self, run: &RunConfig) -> Result<(), ConfigError> {
        let levels = run.refinement.levels;
        if (self.speed_tolerance.len() as u32) < levels {
            return Err(ConfigError::LengthMismatch {
                name: "speed_tolerance",
                expected: levels as usize,
                actual: self.speed_tolerance.len(),
            });
        }
        if self.max_level_deep > levels {
            return Err(ConfigError::LevelOutOfRange {
                name: "max_level_deep",
                level: self.max_level_deep,
                levels,
            });
        }
        if self.moving_topo_files.len() > 1 {
            return Err(ConfigError::RegistryFull {
                registry: "moving topography",
            });
        }
        if self.perturbation_files.len() > 1 {
            return Err(ConfigError::RegistryFull {
                registry: "initial perturbation",
            });
        }
        let mut previous: Option<i64> = None;
        for gauge in &self.gauges {
            if let Some(prev) = previous {
                if gauge.id <= prev {
                    return Err(ConfigError::GaugeOrdering {
                        id: gauge.id,
                        previous: prev,
                    });
                }
            }
            gauge.validate(&run.bounds)?;
            previous = Some(gauge.id);
        }
        Ok(())
    }

    /// Emit the geophysics data file consumed by the engine.
    pub fn records(&self) -> DataFile {
        let mut file = DataFile::new();
        file.push(
            "variable_dt_refinement_ratios",
            Value::Bool(self.variable_dt_refinement_ratios),
        );
        file.push("gravity", Value::Float(self.gravity));
        file.push("coordinate_system", Value::Int(self.coordinate_system.code()));
        file.push("earth_radius", Value::Float(self.earth_radius));
        file.push("coriolis_forcing", Value::Bool(self.coriolis.is_some()));
        file.push("theta_0", Value::Float(self.coriolis.unwrap_or(0.0)));

        file.push("dry_tolerance", Value::Float(self.dry_tolerance));
        file.push("wave_tolerance", Value::Float(self.wave_tolerance));
        file.push(
            "speed_tolerance",
            Value::float_list(self.speed_tolerance.clone()),
        );
        file.push("deep_depth", Value::Float(self.deep_depth));
        file.push("max_level_deep", Value::Int(i64::from(self.max_level_deep)));
        file.push("friction_forcing", Value::Bool(self.friction.enabled));
        file.push("manning_coefficient", Value::Float(self.friction.manning));
        file.push("friction_depth", Value::Float(self.friction.depth_cutoff));

        file.push("topo_type", Value::Int(self.bathymetry.topo_type));
        file.push("x0", Value::Float(self.bathymetry.basin_end));
        file.push("x1", Value::Float(self.bathymetry.shelf_start));
        file.push("x2", Value::Float(self.bathymetry.shoreline));
        file.push("basin_depth", Value::Float(self.bathymetry.basin_depth));
        file.push("shelf_depth", Value::Float(self.bathymetry.shelf_depth));
        file.push("beach_slope", Value::Float(self.bathymetry.beach_slope));

        file.push("ntopofiles", Value::Int(self.topo_files.len() as i64));
        for (i, entry) in self.topo_files.iter().enumerate() {
            file.push(format!("topofile{:02}", i), entry.wire_value());
        }
        file.push("ndtopofiles", Value::Int(self.moving_topo_files.len() as i64));
        for (i, entry) in self.moving_topo_files.iter().enumerate() {
            file.push(format!("dtopofile{:02}", i), entry.wire_value());
        }
        file.push("qinit_type", Value::Int(self.perturbation_type));
        file.push("nqinitfiles", Value::Int(self.perturbation_files.len() as i64));
        for (i, entry) in self.perturbation_files.iter().enumerate() {
            file.push(format!("qinitfile{:02}", i), entry.wire_value());
        }
        file.push("nregions", Value::Int(self.regions.len() as i64));
        for (i, entry) in self.regions.iter().enumerate() {
            file.push(format!("region{:02}", i), entry.wire_value());
        }
        file.push("ngauges", Value::Int(self.gauges.len() as i64));
        for (i, gauge) in self.gauges.iter().enumerate() {
            file.push(format!("gauge{:02}", i), gauge.wire_value());
        }
        file.push("nfixedgrids", Value::Int(self.fixed_grids.len() as i64));
        for (i, entry) in self.fixed_grids.iter().enumerate() {
            file.push(format!("fixedgrid{:02}", i), entry.wire_value());
        }

        file.push("layers", Value::Int(self.multilayer.layers as i64));
        file.push("rho", Value::Float(self.multilayer.density));
        file.push("eta_init", Value::Float(self.multilayer.initial_surface));
        file.push(
            "richardson_tolerance",
            Value::Float(self.multilayer.richardson_tolerance),
        );
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuxType, OutputSchedule, Refinement, RunConfig};
    use crate::types::{Bounds2D, GridShape};

    fn basin_run() -> RunConfig {
        let mut run = RunConfig::new(
            Bounds2D::new(-200e3, 500e3, -300e3, 300e3),
            GridShape::new(70, 60),
            3,
            vec![AuxType::Center; 9],
            12.0 * 3600.0,
            OutputSchedule::EvenSpacing {
                hours: 40.0,
                cadence: 0.25,
            },
        );
        run.refinement = Refinement::anisotropic(5, vec![2, 2, 2, 2, 2]);
        run
    }

    #[test]
    fn test_default_validates_against_basin_run() {
        let run = basin_run();
        assert!(GeoConfig::default().validate(&run).is_ok());
    }

    #[test]
    fn test_second_moving_topo_entry_rejected() {
        let mut geo = GeoConfig::default();
        let entry = MovingTopoEntry {
            topo_type: 1,
            min_level: 1,
            max_level: 3,
            path: "fault.tt1".to_string(),
        };
        assert!(geo.add_moving_topo_file(entry.clone()).is_ok());
        assert!(matches!(
            geo.add_moving_topo_file(entry).unwrap_err(),
            ConfigError::RegistryFull {
                registry: "moving topography"
            }
        ));
    }

    #[test]
    fn test_second_perturbation_entry_rejected() {
        let mut geo = GeoConfig::default();
        let entry = PerturbationEntry {
            min_level: 1,
            max_level: 2,
            path: "hump.xyz".to_string(),
        };
        assert!(geo.add_perturbation_file(entry.clone()).is_ok());
        assert!(geo.add_perturbation_file(entry).is_err());
    }

    #[test]
    fn test_short_speed_tolerance_rejected() {
        let run = basin_run();
        let mut geo = GeoConfig::default();
        geo.speed_tolerance = vec![0.25, 0.5];
        assert!(matches!(
            geo.validate(&run).unwrap_err(),
            ConfigError::LengthMismatch {
                name: "speed_tolerance",
                expected: 5,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_deep_level_beyond_hierarchy_rejected() {
        let run = basin_run();
        let mut geo = GeoConfig::default();
        geo.max_level_deep = 6;
        assert!(matches!(
            geo.validate(&run).unwrap_err(),
            ConfigError::LevelOutOfRange { level: 6, levels: 5, .. }
        ));
    }

    #[test]
    fn test_gauge_ordering_enforced_on_add() {
        let run = basin_run();
        let mut geo = GeoConfig::default();
        geo.add_gauge(&run, Gauge::new(5, 0.0, 0.0)).unwrap();
        assert!(matches!(
            geo.add_gauge(&run, Gauge::new(5, 0.0, 1.0)).unwrap_err(),
            ConfigError::GaugeOrdering { id: 5, previous: 5 }
        ));
    }

    #[test]
    fn test_place_gauges_inside_inset_span() {
        let run = basin_run();
        let mut geo = GeoConfig::default();
        geo.place_gauges(&run, 21, 455e3, -275e3, 275e3).unwrap();
        assert_eq!(geo.gauges.len(), 21);
        assert!(geo.validate(&run).is_ok());
    }

    #[test]
    fn test_registry_counts_on_wire() {
        let run = basin_run();
        let mut geo = GeoConfig::default();
        geo.add_topo_file(TopoFileEntry {
            topo_type: 2,
            min_level: 1,
            max_level: 5,
            path: "shelf.tt2".to_string(),
        });
        geo.place_gauges(&run, 3, 455e3, -275e3, 275e3).unwrap();
        let file = geo.records();
        assert_eq!(file.get("ntopofiles"), Some(&Value::Int(1)));
        assert_eq!(
            file.get("topofile00"),
            Some(&Value::Str("2 1 5 shelf.tt2".to_string()))
        );
        assert_eq!(file.get("ngauges"), Some(&Value::Int(3)));
        assert_eq!(file.get("nfixedgrids"), Some(&Value::Int(0)));
    }
}
