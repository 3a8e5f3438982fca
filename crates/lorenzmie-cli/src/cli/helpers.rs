use super::CliError;
use anyhow::Context;
use lorenzmie_core::serialization::write_text_artifact;
use lorenzmie_core::{CoefficientTolerance, SizeParameters, TableComparison, TruncationOrder};
use std::fmt::Write as _;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr; stdout carries only command output.
pub(super) fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A subscriber may already be installed when embedded; keep that one.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn emit(output: Option<&Path>, content: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            write_text_artifact(path, content)
                .with_context(|| format!("failed to write output '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}

pub(super) fn render_order_summary(params: &SizeParameters, order: TruncationOrder) -> String {
    let mut summary = format!("Truncation order: {order}\n");
    for (layer, (x, m)) in params.x().iter().zip(params.m()).enumerate() {
        let _ = writeln!(
            summary,
            "Layer {}: x = {:.6}, m = {:.6}{:+.6}i",
            layer + 1,
            x,
            m.re,
            m.im
        );
    }
    summary
}

pub(super) fn render_comparison_summary(
    comparison: &TableComparison,
    tolerance: CoefficientTolerance,
) -> String {
    let status = if comparison.passes() { "PASS" } else { "FAIL" };
    let mut summary = format!("Verification status: {status}\n");
    let _ = writeln!(
        summary,
        "Truncation order: reference {}, computed {}",
        comparison.reference_order, comparison.actual_order
    );
    let _ = writeln!(summary, "Rows compared: {}", comparison.compared_rows);
    let _ = writeln!(
        summary,
        "Max abs diff: {:.3e} (absTol {:.1e}), max rel diff: {:.3e} (relTol {:.1e})",
        comparison.max_abs_diff, tolerance.abs_tol, comparison.max_rel_diff, tolerance.rel_tol
    );
    if !comparison.failing_orders.is_empty() {
        let failing: Vec<String> = comparison
            .failing_orders
            .iter()
            .map(ToString::to_string)
            .collect();
        let _ = writeln!(summary, "Failing orders: {}", failing.join(", "));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{render_comparison_summary, render_order_summary};
    use lorenzmie_core::{CoefficientTolerance, SizeParameters, TableComparison, TruncationOrder};
    use num_complex::Complex64;

    #[test]
    fn order_summary_lists_each_layer() {
        let params = SizeParameters::new(
            vec![2.0, 4.0],
            vec![Complex64::new(1.5, 0.0), Complex64::new(1.1, -0.01)],
        )
        .expect("params should be valid");
        let summary = render_order_summary(&params, TruncationOrder::new(11));

        assert_eq!(
            summary,
            "Truncation order: 11\n\
             Layer 1: x = 2.000000, m = 1.500000+0.000000i\n\
             Layer 2: x = 4.000000, m = 1.100000-0.010000i\n"
        );
    }

    #[test]
    fn failing_comparison_lists_orders() {
        let comparison = TableComparison {
            reference_order: 3,
            actual_order: 3,
            compared_rows: 4,
            max_abs_diff: 0.5,
            max_rel_diff: 0.5,
            failing_orders: vec![2, 3],
        };
        let summary = render_comparison_summary(&comparison, CoefficientTolerance::default());
        assert!(summary.starts_with("Verification status: FAIL\n"));
        assert!(summary.contains("Failing orders: 2, 3"));
    }
}
