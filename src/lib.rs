//! # surgerun
//!
//! Run-time configuration generator for a depth-averaged shallow-water
//! storm-surge engine on an adaptively refined mesh.
//!
//! This crate is not the solver. It derives a complete, internally
//! consistent parameter set from a few human-meaningful inputs (simulated
//! hours, output cadence, storm physical parameters, gauge placement) and
//! serializes it into the fixed-format data files the external engine
//! parses. Derivation is single-pass and deterministic: it either
//! succeeds, or fails fast on the first violated invariant before anything
//! touches disk.
//!
//! Three configuration objects are built per run:
//! - [`config::RunConfig`]: domain, grid, time range, output schedule,
//!   time stepping, method selection, boundaries, and AMR structure.
//! - [`config::GeoConfig`]: physical constants, friction, depth-based
//!   refinement thresholds, gauge placement, and the input registries.
//! - [`config::StormConfig`]: wind and pressure forcing, idealized Holland
//!   storm track, and storm-driven refinement thresholds.
//!
//! [`setup::square_basin`] assembles all three for the idealized
//! square-basin case and [`setup::SurgeSetup::write_all`] emits them.

pub mod config;
pub mod error;
pub mod io;
pub mod setup;
pub mod types;

pub use config::{
    alongshore_array, mbar_to_pascal, AuxType, BoundaryKind, CoordinateSystem, DomainSides,
    FixedGridEntry, Friction, Gauge, GeoConfig, Limiter, Method, MovingTopoEntry, Multilayer,
    OutputSchedule, PerturbationEntry, Refinement, RefinementMode, RegionEntry, RunConfig,
    ShelfBathymetry, SourceSplitting, StormConfig, StormKind, TimeStepping, TopoFileEntry,
};
pub use error::ConfigError;
pub use io::{DataFile, DataFileError, Record, Value};
pub use setup::{square_basin, SetupError, SurgeSetup, SUPPORTED_PACKAGE};
pub use types::{Bounds2D, GridShape};
