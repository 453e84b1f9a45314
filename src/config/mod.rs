//! The three configurators and their building blocks.
//!
//! [`RunConfig`] is the numerical base, [`GeoConfig`] layers geophysical
//! parameters and registries over it, and [`StormConfig`] stands alone as
//! the forcing description. Each validates eagerly and emits its own data
//! file.

mod gauges;
mod geo;
mod method;
mod output;
mod refinement;
mod run;
mod storm;
mod timestep;

pub use gauges::{alongshore_array, Gauge, OPEN_WINDOW_END};
pub use geo::{
    CoordinateSystem, FixedGridEntry, Friction, GeoConfig, MovingTopoEntry, Multilayer,
    PerturbationEntry, RegionEntry, ShelfBathymetry, TopoFileEntry,
};
pub use method::{BoundaryKind, DomainSides, Limiter, Method, SourceSplitting};
pub use output::{OutputSchedule, SECONDS_PER_HOUR};
pub use refinement::{Refinement, RefinementMode};
pub use run::{AuxType, RunConfig};
pub use storm::{
    mbar_to_pascal, StormConfig, StormKind, AMBIENT_PRESSURE, MBAR_TO_PA, RHO_AIR,
};
pub use timestep::TimeStepping;
