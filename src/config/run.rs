//! The base numerical configuration: domain, grid, system size, time
//! range, output schedule, time stepping, method, boundaries, and AMR.

use crate::config::{DomainSides, Limiter, Method, OutputSchedule, Refinement, TimeStepping};
use crate::error::ConfigError;
use crate::io::{DataFile, Value};
use crate::types::{Bounds2D, GridShape};

/// Role of one auxiliary variable slot.
///
/// The engine initializes auxiliary variables itself; the configuration
/// only declares where each one lives on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuxType {
    /// Cell-centered value.
    Center,
    /// Capacity function (cell-centered, scales the cell volume).
    Capacity,
    /// Value on the left x-face of each cell.
    XFace,
    /// Value on the lower y-face of each cell.
    YFace,
}

impl AuxType {
    /// The engine's tag for this slot type.
    pub fn name(&self) -> &'static str {
        match self {
            AuxType::Center => "center",
            AuxType::Capacity => "capacity",
            AuxType::XFace => "xleft",
            AuxType::YFace => "yleft",
        }
    }
}

/// Complete numerical configuration for one run.
///
/// Built by [`RunConfig::new`] with engine defaults, then adjusted field by
/// field. Nothing is interpreted here beyond validation; every value is
/// handed to the engine through [`RunConfig::records`].
///
/// # Example
///
/// ```
/// use surgerun::config::{OutputSchedule, RunConfig, AuxType};
/// use surgerun::types::{Bounds2D, GridShape};
///
/// let run = RunConfig::new(
///     Bounds2D::new(-200e3, 500e3, -300e3, 300e3),
///     GridShape::new(70, 60),
///     3,
///     vec![AuxType::Center; 9],
///     12.0 * 3600.0,
///     OutputSchedule::EvenSpacing { hours: 40.0, cadence: 0.25 },
/// );
/// assert_eq!(run.start_time, -43_200.0);
/// assert!(run.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Computational domain extents (m).
    pub bounds: Bounds2D,
    /// Coarse-grid cell counts.
    pub grid: GridShape,
    /// Number of equations in the hyperbolic system.
    pub equation_count: usize,
    /// One tag per auxiliary variable slot.
    pub aux_types: Vec<AuxType>,
    /// 1-based index of the capacity-function slot, if any.
    pub capacity_index: Option<usize>,
    /// Initial simulated time (s). Set to the negated ramp-up duration so
    /// physical hour 0 aligns with the end of ramp-up.
    pub start_time: f64,
    /// Output frame schedule.
    pub schedule: OutputSchedule,
    /// AMR levels that print per-step diagnostics (0 = silent).
    pub verbosity: usize,
    /// Time-stepping control.
    pub timestep: TimeStepping,
    /// Numerical method selection.
    pub method: Method,
    /// Boundary condition per domain side.
    pub sides: DomainSides,
    /// AMR level structure and regridding controls.
    pub refinement: Refinement,
}

impl RunConfig {
    /// Build a configuration with engine defaults for everything not named.
    ///
    /// `ramp_up` seconds of lead-in are prepended before hour 0, giving
    /// `start_time = -ramp_up`. The default method is second order with a
    /// van Leer limiter on every wave family, on a single grid with
    /// extrapolating boundaries.
    pub fn new(
        bounds: Bounds2D,
        grid: GridShape,
        equation_count: usize,
        aux_types: Vec<AuxType>,
        ramp_up: f64,
        schedule: OutputSchedule,
    ) -> Self {
        Self {
            bounds,
            grid,
            equation_count,
            aux_types,
            capacity_index: None,
            start_time: -ramp_up,
            schedule,
            verbosity: 0,
            timestep: TimeStepping::default(),
            method: Method::second_order(equation_count, Limiter::VanLeer),
            sides: DomainSides::default(),
            refinement: Refinement::isotropic(1, Vec::new()),
        }
    }

    /// Ramp-up lead-in duration (s) implied by the start time.
    pub fn ramp_up(&self) -> f64 {
        (-self.start_time).max(0.0)
    }

    /// Check every invariant of the numerical configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in the aux tag list, output
    /// schedule, time stepping, method, boundary pairing, or refinement
    /// structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.capacity_index {
            let tagged = index >= 1
                && index <= self.aux_types.len()
                && self.aux_types[index - 1] == AuxType::Capacity;
            if !tagged {
                return Err(ConfigError::CapacityIndex {
                    index,
                    aux_count: self.aux_types.len(),
                });
            }
        }
        self.schedule.validate()?;
        self.timestep.validate()?;
        self.method.validate()?;
        self.sides.validate()?;
        self.refinement.validate()?;
        Ok(())
    }

    /// Emit the numerics data file consumed by the engine.
    pub fn records(&self) -> DataFile {
        let mut file = DataFile::new();
        file.push("ndim", Value::Int(2));
        file.push("xlower", Value::Float(self.bounds.x_min));
        file.push("xupper", Value::Float(self.bounds.x_max));
        file.push("ylower", Value::Float(self.bounds.y_min));
        file.push("yupper", Value::Float(self.bounds.y_max));
        file.push("mx", Value::Int(self.grid.mx() as i64));
        file.push("my", Value::Int(self.grid.my() as i64));
        file.push("meqn", Value::Int(self.equation_count as i64));
        file.push("maux", Value::Int(self.aux_types.len() as i64));
        file.push(
            "mcapa",
            Value::Int(self.capacity_index.unwrap_or(0) as i64),
        );
        file.push("t0", Value::Float(self.start_time));

        file.push("outstyle", Value::Int(self.schedule.style_code()));
        match &self.schedule {
            OutputSchedule::EvenSpacing { .. } => {
                let frames = self.schedule.frame_count(self.ramp_up()).unwrap_or(0);
                file.push("nout", Value::Int(frames as i64));
                file.push(
                    "tfinal",
                    Value::Float(self.schedule.final_time().unwrap_or(0.0)),
                );
            }
            OutputSchedule::ExplicitTimes(times) => {
                file.push("nout", Value::Int(times.len() as i64));
                file.push("tout", Value::float_list(times.clone()));
            }
            OutputSchedule::StepInterval {
                steps_between,
                total_steps,
            } => {
                file.push(
                    "iout",
                    Value::int_list(vec![*steps_between as i64, *total_steps as i64]),
                );
            }
        }

        file.push("verbosity", Value::Int(self.verbosity as i64));
        file.push("dt_variable", Value::Bool(self.timestep.variable_dt));
        file.push("dt_initial", Value::Float(self.timestep.dt_initial));
        file.push("dt_max", Value::Float(self.timestep.dt_max));
        file.push("cfl_desired", Value::Float(self.timestep.cfl_desired));
        file.push("cfl_max", Value::Float(self.timestep.cfl_max));
        file.push("max_steps", Value::Int(self.timestep.max_steps as i64));

        file.push("order", Value::Int(self.method.order as i64));
        file.push("order_trans", Value::Int(self.method.transverse_order as i64));
        file.push("mwaves", Value::Int(self.method.wave_count as i64));
        file.push("mthlim", Value::int_list(self.method.limiter_codes()));
        file.push("src_split", Value::Int(self.method.source_splitting.code()));
        file.push("mbc", Value::Int(self.method.ghost_cells as i64));

        file.push("mthbc_xlower", Value::Int(self.sides.west.code()));
        file.push("mthbc_xupper", Value::Int(self.sides.east.code()));
        file.push("mthbc_ylower", Value::Int(self.sides.south.code()));
        file.push("mthbc_yupper", Value::Int(self.sides.north.code()));

        file.push("mxnest", Value::Int(self.refinement.signed_levels()));
        // A single-grid run carries no ratio records.
        if self.refinement.levels > 1 {
            let ratios = |r: &[u32]| Value::int_list(r.iter().map(|&v| i64::from(v)).collect());
            file.push("inratx", ratios(&self.refinement.ratios_x));
            file.push("inraty", ratios(&self.refinement.ratios_y));
            file.push("inratt", ratios(&self.refinement.ratios_t));
        }

        let tags: Vec<&str> = self.aux_types.iter().map(AuxType::name).collect();
        file.push("auxtype", Value::Str(tags.join(" ")));

        // Negative Richardson tolerance disables the estimator on the wire.
        file.push(
            "tol",
            Value::Float(self.refinement.richardson_tolerance.unwrap_or(-1.0)),
        );
        file.push("tolsp", Value::Float(self.refinement.flag_tolerance));
        file.push("cutoff", Value::Float(self.refinement.efficiency_cutoff));
        file.push("kcheck", Value::Int(self.refinement.regrid_interval as i64));
        file.push("ibuff", Value::Int(self.refinement.buffer_width as i64));
        file
    }
}
