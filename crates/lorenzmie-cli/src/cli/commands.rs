use super::CliError;
use super::helpers::*;
use lorenzmie_core::particle::{DEFAULT_MEDIUM_INDEX, DEFAULT_WAVELENGTH};
use lorenzmie_core::serialization::{CoefficientReport, load_coefficient_report};
use lorenzmie_core::{
    CoefficientTolerance, Instrument, MieWorkspace, ScatteringConfig, Sphere, compare_tables,
    load_scattering_config, wiscombe_yang,
};
use std::path::PathBuf;

#[derive(clap::Args, Default)]
pub(super) struct ParticleArgs {
    /// Scattering config JSON with particle, instrument and tolerance sections
    #[arg(
        long,
        conflicts_with_all = ["radius", "index", "absorption", "medium_index", "medium_absorption", "wavelength"]
    )]
    config: Option<PathBuf>,

    /// Layer radius [um], innermost layer first; repeat once per layer
    #[arg(long = "radius", value_name = "UM")]
    radius: Vec<f64>,

    /// Layer refractive index; repeat once per layer
    #[arg(long = "index", value_name = "N")]
    index: Vec<f64>,

    /// Layer absorption coefficient; repeat once per layer or omit
    #[arg(long = "absorption", value_name = "K")]
    absorption: Vec<f64>,

    /// Refractive index of the medium
    #[arg(long)]
    medium_index: Option<f64>,

    /// Absorption coefficient of the medium
    #[arg(long)]
    medium_absorption: Option<f64>,

    /// Vacuum wavelength [um]
    #[arg(long)]
    wavelength: Option<f64>,
}

impl ParticleArgs {
    fn is_empty(&self) -> bool {
        self.config.is_none() && self.radius.is_empty()
    }

    fn resolve(&self) -> Result<ScatteringConfig, CliError> {
        if let Some(path) = &self.config {
            tracing::info!(config = %path.display(), "loading scattering config");
            return load_scattering_config(path).map_err(|error| CliError::Compute(error.into()));
        }
        if self.radius.is_empty() {
            return Err(CliError::Usage(
                "either --config or at least one --radius/--index pair is required".to_string(),
            ));
        }

        Ok(ScatteringConfig {
            particle: Sphere::layered(
                self.radius.clone(),
                self.index.clone(),
                self.absorption.clone(),
            ),
            instrument: Instrument {
                n_m: self.medium_index.unwrap_or(DEFAULT_MEDIUM_INDEX),
                k_m: self.medium_absorption.unwrap_or(0.0),
                wavelength: self.wavelength.unwrap_or(DEFAULT_WAVELENGTH),
            },
            tolerance: CoefficientTolerance::default(),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args)]
pub(super) struct CoefficientsArgs {
    #[command(flatten)]
    particle: ParticleArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct VerifyArgs {
    /// Coefficient report (JSON) to compare against
    #[arg(long)]
    reference: PathBuf,

    // Falls back to the inputs recorded in the report when empty.
    #[command(flatten)]
    particle: ParticleArgs,

    /// Override the absolute tolerance
    #[arg(long)]
    abs_tol: Option<f64>,

    /// Override the relative tolerance
    #[arg(long)]
    rel_tol: Option<f64>,
}

pub(super) fn run_coefficients_command(args: CoefficientsArgs) -> Result<i32, CliError> {
    let config = args.particle.resolve()?;
    let params = config.particle.size_parameters(&config.instrument)?;
    let table = config.particle.ab(&config.instrument)?;
    tracing::info!(order = %table.order(), layers = params.layer_count(), "computed coefficients");

    let rendered = match args.format {
        OutputFormat::Text => lorenzmie_core::serialization::render_coefficient_table(&table),
        OutputFormat::Json => CoefficientReport::new(&params, &table).to_json_pretty()?,
    };
    emit(args.output.as_deref(), &rendered)?;
    Ok(0)
}

pub(super) fn run_order_command(args: ParticleArgs) -> Result<i32, CliError> {
    let config = args.resolve()?;
    let params = config.particle.size_parameters(&config.instrument)?;
    let order = wiscombe_yang(&params);
    print!("{}", render_order_summary(&params, order));
    Ok(0)
}

pub(super) fn run_verify_command(args: VerifyArgs) -> Result<i32, CliError> {
    let report = load_coefficient_report(&args.reference)?;
    let reference = report.table()?;

    let (actual, mut tolerance) = if args.particle.is_empty() {
        tracing::debug!("recomputing from the size parameters recorded in the report");
        let params = report.size_parameters()?;
        let table = MieWorkspace::new().coefficients(&params);
        (table, CoefficientTolerance::default())
    } else {
        let config = args.particle.resolve()?;
        (config.particle.ab(&config.instrument)?, config.tolerance)
    };
    if let Some(abs_tol) = args.abs_tol {
        tolerance.abs_tol = abs_tol;
    }
    if let Some(rel_tol) = args.rel_tol {
        tolerance.rel_tol = rel_tol;
    }

    let comparison = compare_tables(&reference, &actual, tolerance);
    print!("{}", render_comparison_summary(&comparison, tolerance));
    Ok(if comparison.passes() { 0 } else { 1 })
}
