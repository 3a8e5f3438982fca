use crate::domain::CoefficientTable;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Mixed absolute/relative acceptance window for complex coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoefficientTolerance {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub relative_floor: f64,
}

impl Default for CoefficientTolerance {
    fn default() -> Self {
        Self {
            abs_tol: 1.0e-6,
            rel_tol: 1.0e-6,
            relative_floor: 1.0e-12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

pub fn compare_with_tolerance(
    expected: Complex64,
    actual: Complex64,
    tolerance: CoefficientTolerance,
) -> ToleranceComparison {
    let abs_diff = (actual - expected).norm();
    let rel_denominator = expected.norm().max(tolerance.relative_floor);
    let rel_diff = abs_diff / rel_denominator;
    // NaN differences fail both comparisons.
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * rel_denominator;

    ToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

/// Outcome of checking a computed table against a reference table row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableComparison {
    pub reference_order: usize,
    pub actual_order: usize,
    pub compared_rows: usize,
    pub max_abs_diff: f64,
    pub max_rel_diff: f64,
    pub failing_orders: Vec<usize>,
}

impl TableComparison {
    pub fn orders_match(&self) -> bool {
        self.reference_order == self.actual_order
    }

    pub fn passes(&self) -> bool {
        self.orders_match() && self.failing_orders.is_empty()
    }
}

/// Compares the rows both tables share; an order mismatch fails the comparison on its own.
pub fn compare_tables(
    reference: &CoefficientTable,
    actual: &CoefficientTable,
    tolerance: CoefficientTolerance,
) -> TableComparison {
    let mut comparison = TableComparison {
        reference_order: reference.order().get(),
        actual_order: actual.order().get(),
        compared_rows: 0,
        max_abs_diff: 0.0,
        max_rel_diff: 0.0,
        failing_orders: Vec::new(),
    };

    for ((n, expected_a, expected_b), (_, actual_a, actual_b)) in
        reference.pairs().zip(actual.pairs())
    {
        comparison.compared_rows += 1;
        let mut row_passes = true;
        for (expected, computed) in [(expected_a, actual_a), (expected_b, actual_b)] {
            let outcome = compare_with_tolerance(expected, computed, tolerance);
            comparison.max_abs_diff = comparison.max_abs_diff.max(outcome.abs_diff);
            comparison.max_rel_diff = comparison.max_rel_diff.max(outcome.rel_diff);
            row_passes &= outcome.passes;
        }
        if !row_passes {
            comparison.failing_orders.push(n);
        }
    }

    comparison
}
