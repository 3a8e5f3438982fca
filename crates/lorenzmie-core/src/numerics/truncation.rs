//! Partial-wave truncation order.
//!
//! Wiscombe, Appl. Opt. 19, 1505 (1980) for the outer boundary, extended to
//! layered spheres by Yang, Appl. Opt. 42, 1710 (2003), Eq. (30).

use crate::domain::{SizeParameters, TruncationOrder};

const SMALL_PARTICLE_LIMIT: f64 = 8.0;
const MEDIUM_PARTICLE_LIMIT: f64 = 4200.0;

/// Wiscombe's empirical order for the outermost size parameter alone.
pub fn wiscombe_order(xl: f64) -> usize {
    let xl = xl.abs();
    let ns = if xl <= SMALL_PARTICLE_LIMIT {
        xl + 4.0 * xl.cbrt() + 1.0
    } else if xl <= MEDIUM_PARTICLE_LIMIT {
        xl + 4.05 * xl.cbrt() + 2.0
    } else {
        xl + 4.0 * xl.cbrt() + 2.0
    };
    ns.floor() as usize
}

/// Number of terms needed for a layered sphere.
///
/// Besides the Wiscombe bound this takes `|x_j m_j|` and `|x_{j+1} m_j|` for every layer,
/// where the next-layer index wraps around so the outermost layer pairs with the core.
/// Zero size parameters are a caller error; the result is then meaningless.
pub fn wiscombe_yang(params: &SizeParameters) -> TruncationOrder {
    let x = params.x();
    let m = params.m();
    let layers = x.len();

    let ns = wiscombe_order(params.outer_size_parameter()) as f64;
    let nstop = m
        .iter()
        .enumerate()
        .map(|(j, m_j)| {
            let inside = (*m_j * x[j]).norm();
            let crossing = (*m_j * x[(j + 1) % layers]).norm();
            inside.max(crossing)
        })
        .fold(ns, f64::max);

    let order = TruncationOrder::new(nstop.floor() as usize);
    tracing::debug!(layers, outer_x = x[layers - 1], %order, "selected truncation order");
    order
}
