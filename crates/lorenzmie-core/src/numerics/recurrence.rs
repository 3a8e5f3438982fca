//! Logarithmic-derivative and Riccati-Bessel recurrences.
//!
//! Equation numbers follow Peña & Pal, Comput. Phys. Commun. 180, 2348 (2009).
//! Every kernel writes into caller-owned slices; none of them allocate. `D1` slices run
//! one order past the truncation order `N`, all others end at `N`.
//! Denominators are not guarded: a vanishing `D1[n] + n/z` yields non-finite values
//! that propagate to the caller unchanged.

use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// `D1_n(z) = psi_n'(z) / psi_n(z)` by downward recurrence from zero at the last slot. Eq. (16).
///
/// Callers pass `N + 2` slots so the sentinel sits at `N + 1`. The start value is only
/// a guess: for `|z|` close to `N` the top orders have not yet converged when the
/// recurrence reaches them.
pub fn downward_log_derivative(z: Complex64, d1: &mut [Complex64]) {
    let top = d1.len() - 1;
    d1[top] = ZERO;
    for n in (1..=top).rev() {
        let n_over_z = n as f64 / z;
        d1[n - 1] = n_over_z - 1.0 / (d1[n] + n_over_z);
    }
}

/// `psi_0(z) zeta_0(z) = (1 - exp(2iz)) / 2`. Eq. (18a).
fn psi_zeta_seed(z: Complex64) -> Complex64 {
    0.5 * (1.0 - Complex64::from_polar((-2.0 * z.im).exp(), 2.0 * z.re))
}

/// `D3_n(z) = zeta_n'(z) / zeta_n(z)` by upward recurrence on the product `psi_n zeta_n`. Eq. (18).
///
/// `d1` must already hold the downward `D1` values for the same argument.
pub fn outgoing_log_derivative(z: Complex64, d1: &[Complex64], d3: &mut [Complex64]) {
    d3[0] = I;
    let mut psi_zeta = psi_zeta_seed(z);
    for n in 1..d3.len() {
        let n_over_z = n as f64 / z;
        psi_zeta *= (n_over_z - d1[n - 1]) * (n_over_z - d3[n - 1]);
        d3[n] = d1[n] + I / psi_zeta;
    }
}

/// Riccati-Bessel `psi_n(z)` and `zeta_n(z)` by upward recurrence, filling `d3` on the way.
/// Eqs. (18), (20) and (21).
pub fn riccati_bessel_upward(
    z: Complex64,
    d1: &[Complex64],
    d3: &mut [Complex64],
    psi: &mut [Complex64],
    zeta: &mut [Complex64],
) {
    psi[0] = z.sin();
    zeta[0] = -I * (I * z).exp();
    d3[0] = I;
    let mut psi_zeta = psi_zeta_seed(z);
    for n in 1..psi.len() {
        let n_over_z = n as f64 / z;
        let psi_step = n_over_z - d1[n - 1];
        let zeta_step = n_over_z - d3[n - 1];
        psi[n] = psi[n - 1] * psi_step;
        zeta[n] = zeta[n - 1] * zeta_step;
        psi_zeta *= psi_step * zeta_step;
        d3[n] = d1[n] + I / psi_zeta;
    }
}

/// Argument of one side of a layer boundary with its log-derivative arrays.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySide<'a> {
    pub z: Complex64,
    pub d1: &'a [Complex64],
    pub d3: &'a [Complex64],
}

/// `Q_n = (psi_n / zeta_n)(z_inner) / (psi_n / zeta_n)(z_outer)` by upward recurrence. Eq. (19).
///
/// Both arguments carry the index of the outer layer; `radius_ratio` is `x_{l-1} / x_l`.
pub fn boundary_ratio(
    outer: BoundarySide<'_>,
    inner: BoundarySide<'_>,
    radius_ratio: f64,
    q: &mut [Complex64],
) {
    let (a_outer, b_outer) = (outer.z.re, outer.z.im);
    let (a_inner, b_inner) = (inner.z.re, inner.z.im);
    let numerator = Complex64::from_polar(1.0, -2.0 * a_inner) - (-2.0 * b_inner).exp();
    let denominator = Complex64::from_polar(1.0, -2.0 * a_outer) - (-2.0 * b_outer).exp();
    q[0] = numerator / denominator * (2.0 * (b_inner - b_outer)).exp();

    let scale = radius_ratio * radius_ratio;
    for n in 1..q.len() {
        let order = n as f64;
        q[n] = q[n - 1]
            * scale
            * (outer.z * outer.d1[n] + order)
            * (order - outer.z * outer.d3[n - 1])
            / ((inner.z * inner.d1[n] + order) * (order - inner.z * inner.d3[n - 1]));
    }
}
