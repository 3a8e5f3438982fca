//! Physical description of a layered sphere and the optical train it sits in.
//!
//! Lengths are in micrometres throughout; only their ratio to the wavelength matters.

use crate::domain::{CoefficientTable, Layer, Medium, MieError, MieResult, SizeParameters};
use crate::numerics::{MieWorkspace, wiscombe_yang};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MEDIUM_INDEX: f64 = 1.339;
pub const DEFAULT_WAVELENGTH: f64 = 0.447;

/// Concentric layers, innermost first. The index of layer `j` is `n_p[j] + i k_p[j]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sphere {
    pub a_p: Vec<f64>,
    pub n_p: Vec<f64>,
    /// Empty means non-absorbing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub k_p: Vec<f64>,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(vec![1.0], vec![1.5])
    }
}

impl Sphere {
    pub fn new(a_p: Vec<f64>, n_p: Vec<f64>) -> Self {
        Self {
            a_p,
            n_p,
            k_p: Vec::new(),
        }
    }

    pub fn layered(a_p: Vec<f64>, n_p: Vec<f64>, k_p: Vec<f64>) -> Self {
        Self { a_p, n_p, k_p }
    }

    pub fn homogeneous(a_p: f64, n_p: f64) -> Self {
        Self::new(vec![a_p], vec![n_p])
    }

    pub fn layers(&self) -> MieResult<Vec<Layer>> {
        let absorbing = !self.k_p.is_empty();
        if self.a_p.len() != self.n_p.len() || (absorbing && self.k_p.len() != self.a_p.len()) {
            return Err(MieError::input_validation(
                "INPUT.LAYER_SHAPE",
                format!(
                    "radii ({}), indices ({}) and absorption coefficients ({}) must describe the same layers",
                    self.a_p.len(),
                    self.n_p.len(),
                    self.k_p.len()
                ),
            ));
        }

        Ok(self
            .a_p
            .iter()
            .zip(&self.n_p)
            .enumerate()
            .map(|(j, (radius, n))| {
                let k = if absorbing { self.k_p[j] } else { 0.0 };
                Layer::new(*radius, Complex64::new(*n, k))
            })
            .collect())
    }

    pub fn size_parameters(&self, instrument: &Instrument) -> MieResult<SizeParameters> {
        SizeParameters::from_layers(&self.layers()?, &instrument.medium())
    }

    /// Lorenz-Mie coefficients of this sphere in the given instrument.
    pub fn ab(&self, instrument: &Instrument) -> MieResult<CoefficientTable> {
        mie_coefficients(&self.layers()?, &instrument.medium())
    }

    /// Same as [`Sphere::ab`] but reuses the buffers of `workspace`.
    pub fn ab_with(
        &self,
        instrument: &Instrument,
        workspace: &mut MieWorkspace,
    ) -> MieResult<CoefficientTable> {
        let params = self.size_parameters(instrument)?;
        Ok(workspace.coefficients(&params))
    }
}

/// Immersion medium and illumination.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instrument {
    pub n_m: f64,
    pub k_m: f64,
    /// Vacuum wavelength.
    pub wavelength: f64,
}

impl Default for Instrument {
    fn default() -> Self {
        Self {
            n_m: DEFAULT_MEDIUM_INDEX,
            k_m: 0.0,
            wavelength: DEFAULT_WAVELENGTH,
        }
    }
}

impl Instrument {
    pub fn new(n_m: f64, wavelength: f64) -> Self {
        Self {
            n_m,
            k_m: 0.0,
            wavelength,
        }
    }

    pub fn medium(&self) -> Medium {
        Medium::new(Complex64::new(self.n_m, self.k_m), self.wavelength)
    }
}

/// Validates the layers and computes `(a_n, b_n)` up to the Wiscombe-Yang order.
pub fn mie_coefficients(layers: &[Layer], medium: &Medium) -> MieResult<CoefficientTable> {
    let params = SizeParameters::from_layers(layers, medium)?;
    let order = wiscombe_yang(&params);
    tracing::debug!(
        layers = layers.len(),
        wavelength = medium.wavelength,
        %order,
        "computing Lorenz-Mie coefficients"
    );
    let mut workspace = MieWorkspace::with_order(order);
    Ok(workspace.compute(&params, order))
}
