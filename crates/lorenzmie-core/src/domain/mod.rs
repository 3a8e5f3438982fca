pub mod errors;

pub use errors::{MieError, MieErrorCategory, MieResult};

use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// One concentric shell: outer radius and complex refractive index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub radius: f64,
    pub index: Complex64,
}

impl Layer {
    pub fn new(radius: f64, index: Complex64) -> Self {
        Self { radius, index }
    }
}

/// Surrounding medium and vacuum wavelength, in the same length unit as the layer radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub index: Complex64,
    pub wavelength: f64,
}

impl Medium {
    pub fn new(index: Complex64, wavelength: f64) -> Self {
        Self { index, wavelength }
    }

    pub fn wavenumber(&self) -> f64 {
        2.0 * PI * self.index.re / self.wavelength
    }

    fn validate(&self) -> MieResult<()> {
        if !self.wavelength.is_finite() || self.wavelength <= 0.0 {
            return Err(MieError::input_validation(
                "INPUT.WAVELENGTH",
                format!("wavelength must be positive, got {}", self.wavelength),
            ));
        }
        if !self.index.is_finite() || self.index.re <= 0.0 {
            return Err(MieError::input_validation(
                "INPUT.MEDIUM_INDEX",
                format!(
                    "medium refractive index must be finite with positive real part, got {}",
                    self.index
                ),
            ));
        }
        Ok(())
    }
}

/// Per-layer size parameters `x_j` and relative indices `m_j`, innermost layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeParameters {
    x: Vec<f64>,
    m: Vec<Complex64>,
}

impl SizeParameters {
    /// Wraps already-derived size parameters. Layer ordering is not checked here.
    pub fn new(x: Vec<f64>, m: Vec<Complex64>) -> MieResult<Self> {
        if x.is_empty() {
            return Err(MieError::input_validation(
                "INPUT.LAYER_COUNT",
                "at least one layer is required",
            ));
        }
        if x.len() != m.len() {
            return Err(MieError::input_validation(
                "INPUT.LAYER_SHAPE",
                format!(
                    "size parameters ({}) and relative indices ({}) must have the same length",
                    x.len(),
                    m.len()
                ),
            ));
        }
        Ok(Self { x, m })
    }

    /// Validates physical layers against the medium and converts them to size parameters.
    pub fn from_layers(layers: &[Layer], medium: &Medium) -> MieResult<Self> {
        if layers.is_empty() {
            return Err(MieError::input_validation(
                "INPUT.LAYER_COUNT",
                "at least one layer is required",
            ));
        }
        medium.validate()?;

        for (position, layer) in layers.iter().enumerate() {
            if !layer.radius.is_finite() || layer.radius <= 0.0 {
                return Err(MieError::input_validation(
                    "INPUT.RADIUS",
                    format!(
                        "layer {} radius must be positive, got {}",
                        position + 1,
                        layer.radius
                    ),
                ));
            }
            if !layer.index.is_finite() {
                return Err(MieError::input_validation(
                    "INPUT.LAYER_INDEX",
                    format!(
                        "layer {} refractive index must be finite, got {}",
                        position + 1,
                        layer.index
                    ),
                ));
            }
        }

        if let Some(position) = layers
            .windows(2)
            .position(|pair| pair[1].radius < pair[0].radius)
        {
            return Err(MieError::input_validation(
                "INPUT.LAYER_ORDER",
                format!(
                    "layer radii must be sorted innermost first; layer {} ({}) is smaller than layer {} ({})",
                    position + 2,
                    layers[position + 1].radius,
                    position + 1,
                    layers[position].radius
                ),
            ));
        }

        let k = medium.wavenumber();
        let x = layers.iter().map(|layer| k * layer.radius).collect();
        let m = layers
            .iter()
            .map(|layer| layer.index / medium.index)
            .collect();
        Ok(Self { x, m })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn m(&self) -> &[Complex64] {
        &self.m
    }

    pub fn layer_count(&self) -> usize {
        self.x.len()
    }

    pub fn outer_size_parameter(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    pub fn outer_relative_index(&self) -> Complex64 {
        self.m[self.m.len() - 1]
    }
}

/// Highest partial-wave index `N` kept in the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TruncationOrder(usize);

impl TruncationOrder {
    pub const fn new(order: usize) -> Self {
        Self(order)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for TruncationOrder {
    fn from(order: usize) -> Self {
        Self(order)
    }
}

impl Display for TruncationOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scattering coefficients `(a_n, b_n)` for `n = 0..=N`. Row 0 is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    a: Vec<Complex64>,
    b: Vec<Complex64>,
}

impl CoefficientTable {
    /// Builds a table from its two columns, forcing the monopole row to zero.
    pub fn from_columns(mut a: Vec<Complex64>, mut b: Vec<Complex64>) -> MieResult<Self> {
        if a.is_empty() || a.len() != b.len() {
            return Err(MieError::input_validation(
                "INPUT.TABLE_SHAPE",
                format!(
                    "coefficient columns must be non-empty and equally long, got {} and {}",
                    a.len(),
                    b.len()
                ),
            ));
        }
        a[0] = ZERO;
        b[0] = ZERO;
        Ok(Self { a, b })
    }

    pub(crate) fn zeros(order: TruncationOrder) -> Self {
        Self {
            a: vec![ZERO; order.get() + 1],
            b: vec![ZERO; order.get() + 1],
        }
    }

    pub(crate) fn columns_mut(&mut self) -> (&mut [Complex64], &mut [Complex64]) {
        (&mut self.a, &mut self.b)
    }

    pub fn order(&self) -> TruncationOrder {
        TruncationOrder(self.a.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn a(&self) -> &[Complex64] {
        &self.a
    }

    pub fn b(&self) -> &[Complex64] {
        &self.b
    }

    pub fn get(&self, n: usize) -> Option<(Complex64, Complex64)> {
        Some((*self.a.get(n)?, *self.b.get(n)?))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, Complex64, Complex64)> + '_ {
        self.a
            .iter()
            .zip(&self.b)
            .enumerate()
            .map(|(n, (a, b))| (n, *a, *b))
    }
}
