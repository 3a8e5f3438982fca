//! Lorenz-Mie coefficients of a multilayered sphere.
//!
//! Yang, Appl. Opt. 42, 1710 (2003); equation numbers follow Peña & Pal,
//! Comput. Phys. Commun. 180, 2348 (2009). The core seeds `H_a`/`H_b`, every
//! further layer boundary transforms them, and the outermost boundary against
//! the medium turns them into `a_n` and `b_n`.

use super::recurrence::{
    BoundarySide, boundary_ratio, downward_log_derivative, outgoing_log_derivative,
    riccati_bessel_upward,
};
use super::truncation::wiscombe_yang;
use crate::domain::{CoefficientTable, SizeParameters, TruncationOrder};
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Running `H_a` and `H_b` of the layers enclosed so far. Eqs. (7), (8).
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LayerCoefficients {
    pub(crate) ha: Vec<Complex64>,
    pub(crate) hb: Vec<Complex64>,
}

impl LayerCoefficients {
    /// Core values `H_a = H_b = D1(m_1 x_1)`; `d1` must match the buffer length.
    fn seed(&mut self, d1: &[Complex64]) {
        self.ha.copy_from_slice(d1);
        self.hb.copy_from_slice(d1);
    }
}

/// Scratch buffers for the recurrences, reused across calls.
///
/// The `D1` buffers carry orders `0..=N + 1`, where `D1_{N+1} = 0` seeds the
/// downward recurrence; every other buffer holds `0..=N`.
///
/// Results are identical to [`compute_coefficients`]; a workspace only saves the
/// allocations when coefficients are recomputed many times, e.g. inside a fit.
#[derive(Debug, Clone, Default)]
pub struct MieWorkspace {
    d1_outer: Vec<Complex64>,
    d1_inner: Vec<Complex64>,
    d3_outer: Vec<Complex64>,
    d3_inner: Vec<Complex64>,
    q: Vec<Complex64>,
    psi: Vec<Complex64>,
    zeta: Vec<Complex64>,
    carried: LayerCoefficients,
}

impl MieWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: TruncationOrder) -> Self {
        let mut workspace = Self::new();
        workspace.reserve(order);
        workspace
    }

    /// Order the buffers currently hold, or `None` before the first use.
    pub fn prepared_order(&self) -> Option<TruncationOrder> {
        self.psi
            .len()
            .checked_sub(1)
            .map(TruncationOrder::new)
    }

    /// Sizes every buffer for `order`, discarding previous contents.
    pub fn reserve(&mut self, order: TruncationOrder) {
        let len = order.get() + 1;
        for buffer in [&mut self.d1_outer, &mut self.d1_inner] {
            buffer.clear();
            buffer.resize(len + 1, ZERO);
        }
        for buffer in [
            &mut self.d3_outer,
            &mut self.d3_inner,
            &mut self.q,
            &mut self.psi,
            &mut self.zeta,
            &mut self.carried.ha,
            &mut self.carried.hb,
        ] {
            buffer.clear();
            buffer.resize(len, ZERO);
        }
    }

    /// Selects the truncation order and computes the table.
    pub fn coefficients(&mut self, params: &SizeParameters) -> CoefficientTable {
        let order = wiscombe_yang(params);
        self.compute(params, order)
    }

    /// Computes `(a_n, b_n)` for `n = 0..=order`.
    ///
    /// Layers are taken innermost first; unsorted size parameters are not detected here.
    pub fn compute(&mut self, params: &SizeParameters, order: TruncationOrder) -> CoefficientTable {
        let _span = tracing::debug_span!(
            "mie_coefficients",
            layers = params.layer_count(),
            order = order.get()
        )
        .entered();

        if order.get() == 0 {
            tracing::debug!("vanishing particle, returning the monopole row only");
            return CoefficientTable::zeros(order);
        }
        self.reserve(order);

        let x = params.x();
        let m = params.m();

        downward_log_derivative(m[0] * x[0], &mut self.d1_outer);
        let mut carried = std::mem::take(&mut self.carried);
        carried.seed(&self.d1_outer[..=order.get()]);

        for (x_pair, m_pair) in x.windows(2).zip(m.windows(2)) {
            self.cross_boundary(&mut carried, x_pair, m_pair);
        }

        let table = self.exit_into_medium(&carried, params, order);
        self.carried = carried;
        table
    }

    /// Carries `H_a`/`H_b` across the boundary between layer `l - 1` and `l`. Eqs. (7b), (8b), (12)-(15).
    fn cross_boundary(
        &mut self,
        carried: &mut LayerCoefficients,
        x_pair: &[f64],
        m_pair: &[Complex64],
    ) {
        let (x_inner, x_outer) = (x_pair[0], x_pair[1]);
        let (m_inner, m_outer) = (m_pair[0], m_pair[1]);
        let z_outer = m_outer * x_outer;
        let z_inner = m_outer * x_inner;

        downward_log_derivative(z_outer, &mut self.d1_outer);
        downward_log_derivative(z_inner, &mut self.d1_inner);
        outgoing_log_derivative(z_outer, &self.d1_outer, &mut self.d3_outer);
        outgoing_log_derivative(z_inner, &self.d1_inner, &mut self.d3_inner);

        let outer = BoundarySide {
            z: z_outer,
            d1: &self.d1_outer,
            d3: &self.d3_outer,
        };
        let inner = BoundarySide {
            z: z_inner,
            d1: &self.d1_inner,
            d3: &self.d3_inner,
        };
        boundary_ratio(outer, inner, x_inner / x_outer, &mut self.q);

        for n in 0..self.q.len() {
            let blend = |g1: Complex64, g2: Complex64| {
                let q = self.q[n];
                (g2 * self.d1_outer[n] - q * g1 * self.d3_outer[n]) / (g2 - q * g1)
            };

            let ha = carried.ha[n];
            carried.ha[n] = blend(
                m_outer * ha - m_inner * self.d1_inner[n],
                m_outer * ha - m_inner * self.d3_inner[n],
            );

            let hb = carried.hb[n];
            carried.hb[n] = blend(
                m_inner * hb - m_outer * self.d1_inner[n],
                m_inner * hb - m_outer * self.d3_inner[n],
            );
        }
    }

    /// Matches the enclosed layers to the medium. Eqs. (5), (6), (20), (21).
    fn exit_into_medium(
        &mut self,
        enclosed: &LayerCoefficients,
        params: &SizeParameters,
        order: TruncationOrder,
    ) -> CoefficientTable {
        let x_outer = params.outer_size_parameter();
        let m_outer = params.outer_relative_index();
        let z = Complex64::new(x_outer, 0.0);

        downward_log_derivative(z, &mut self.d1_outer);
        riccati_bessel_upward(
            z,
            &self.d1_outer,
            &mut self.d3_outer,
            &mut self.psi,
            &mut self.zeta,
        );

        let mut table = CoefficientTable::zeros(order);
        let (a, b) = table.columns_mut();
        for n in 1..=order.get() {
            let n_over_x = n as f64 / x_outer;
            let psi = (self.psi[n], self.psi[n - 1]);
            let zeta = (self.zeta[n], self.zeta[n - 1]);

            let fac = enclosed.ha[n] / m_outer + n_over_x;
            a[n] = (fac * psi.0 - psi.1) / (fac * zeta.0 - zeta.1);

            let fac = enclosed.hb[n] * m_outer + n_over_x;
            b[n] = (fac * psi.0 - psi.1) / (fac * zeta.0 - zeta.1);
        }

        table
    }
}

/// One-shot coefficient computation with a fresh workspace.
pub fn compute_coefficients(params: &SizeParameters, order: TruncationOrder) -> CoefficientTable {
    MieWorkspace::with_order(order).compute(params, order)
}
