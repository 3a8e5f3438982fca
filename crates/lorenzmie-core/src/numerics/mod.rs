pub mod coefficients;
pub mod recurrence;
pub mod tolerance;
pub mod truncation;

pub use coefficients::{MieWorkspace, compute_coefficients};
pub use recurrence::{
    BoundarySide, boundary_ratio, downward_log_derivative, outgoing_log_derivative,
    riccati_bessel_upward,
};
pub use tolerance::{
    CoefficientTolerance, TableComparison, ToleranceComparison, compare_tables,
    compare_with_tolerance,
};
pub use truncation::{wiscombe_order, wiscombe_yang};
