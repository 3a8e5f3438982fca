//! Lorenz-Mie scattering coefficients for homogeneous and concentrically layered spheres.

pub mod config;
pub mod domain;
pub mod numerics;
pub mod particle;
pub mod serialization;

pub use config::{ConfigError, ScatteringConfig, load_scattering_config, parse_scattering_config};
pub use domain::{
    CoefficientTable, Layer, Medium, MieError, MieErrorCategory, MieResult, SizeParameters,
    TruncationOrder,
};
pub use numerics::{
    CoefficientTolerance, MieWorkspace, TableComparison, compare_tables, compute_coefficients,
    wiscombe_order, wiscombe_yang,
};
pub use particle::{Instrument, Sphere, mie_coefficients};
pub use serialization::{CoefficientReport, ComplexValue};
