use crate::domain::{CoefficientTable, MieError, MieResult, SizeParameters};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Non-finite parts are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ComplexValue {
    #[serde(with = "non_finite")]
    pub re: f64,
    #[serde(with = "non_finite")]
    pub im: f64,
}

/// JSON has no NaN or infinity; those travel as strings so a report survives a round trip.
mod non_finite {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    fn label(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some("NaN")
        } else if value == f64::INFINITY {
            Some("inf")
        } else if value == f64::NEG_INFINITY {
            Some("-inf")
        } else {
            None
        }
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match label(*value) {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_f64(*value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Encoded::deserialize(deserializer)? {
            Encoded::Number(value) => Ok(value),
            Encoded::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!(
                    "expected a number, \"NaN\", \"inf\" or \"-inf\", found \"{other}\""
                ))),
            },
        }
    }
}

impl From<Complex64> for ComplexValue {
    fn from(value: Complex64) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

impl From<ComplexValue> for Complex64 {
    fn from(value: ComplexValue) -> Self {
        Complex64::new(value.re, value.im)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CoefficientRow {
    pub n: usize,
    pub a: ComplexValue,
    pub b: ComplexValue,
}

/// JSON form of a computed table together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientReport {
    pub order: usize,
    pub size_parameters: Vec<f64>,
    pub relative_indices: Vec<ComplexValue>,
    pub coefficients: Vec<CoefficientRow>,
}

impl CoefficientReport {
    pub fn new(params: &SizeParameters, table: &CoefficientTable) -> Self {
        Self {
            order: table.order().get(),
            size_parameters: params.x().to_vec(),
            relative_indices: params.m().iter().copied().map(ComplexValue::from).collect(),
            coefficients: table
                .pairs()
                .map(|(n, a, b)| CoefficientRow {
                    n,
                    a: a.into(),
                    b: b.into(),
                })
                .collect(),
        }
    }

    pub fn size_parameters(&self) -> MieResult<SizeParameters> {
        SizeParameters::new(
            self.size_parameters.clone(),
            self.relative_indices.iter().copied().map(Complex64::from).collect(),
        )
    }

    /// Rebuilds the table; rows must be listed as `n = 0..=order` without gaps.
    pub fn table(&self) -> MieResult<CoefficientTable> {
        if self.coefficients.len() != self.order + 1 {
            return Err(MieError::input_validation(
                "INPUT.TABLE_SHAPE",
                format!(
                    "report of order {} lists {} rows",
                    self.order,
                    self.coefficients.len()
                ),
            ));
        }
        if let Some(row) = self
            .coefficients
            .iter()
            .enumerate()
            .find_map(|(expected, row)| (row.n != expected).then_some(row))
        {
            return Err(MieError::input_validation(
                "INPUT.TABLE_SHAPE",
                format!("coefficient rows are out of sequence at n = {}", row.n),
            ));
        }

        let (a, b): (Vec<_>, Vec<_>) = self
            .coefficients
            .iter()
            .map(|row| (Complex64::from(row.a), Complex64::from(row.b)))
            .unzip();
        CoefficientTable::from_columns(a, b)
    }

    pub fn to_json_pretty(&self) -> MieResult<String> {
        serde_json::to_string_pretty(self).map_err(|error| {
            MieError::internal(
                "INTERNAL.REPORT_ENCODE",
                format!("failed to encode coefficient report: {error}"),
            )
        })
    }
}

pub fn format_scientific(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$e}",
        width = width,
        precision = precision
    )
}

/// Fixed-width text listing, one `n Re(a) Im(a) Re(b) Im(b)` row per order.
pub fn render_coefficient_table(table: &CoefficientTable) -> String {
    let mut rendered = format!(
        "# {:>3} {:>24} {:>24} {:>24} {:>24}\n",
        "n", "Re(a_n)", "Im(a_n)", "Re(b_n)", "Im(b_n)"
    );
    for (n, a, b) in table.pairs() {
        rendered.push_str(&format!("{n:>5}"));
        for value in [a.re, a.im, b.re, b.im] {
            rendered.push(' ');
            rendered.push_str(&format_scientific(value, 24, 16));
        }
        rendered.push('\n');
    }
    rendered
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

pub fn write_coefficient_report(path: &Path, report: &CoefficientReport) -> MieResult<()> {
    let json = report.to_json_pretty()?;
    write_text_artifact(path, &json).map_err(|error| {
        MieError::io_system(
            "IO.REPORT_WRITE",
            format!(
                "failed to write coefficient report '{}': {error}",
                path.display()
            ),
        )
    })
}

pub fn load_coefficient_report(path: &Path) -> MieResult<CoefficientReport> {
    let source = fs::read_to_string(path).map_err(|error| {
        MieError::io_system(
            "IO.REPORT_READ",
            format!(
                "failed to read coefficient report '{}': {error}",
                path.display()
            ),
        )
    })?;
    serde_json::from_str(&source).map_err(|error| {
        MieError::input_validation(
            "INPUT.REPORT_PARSE",
            format!(
                "failed to parse coefficient report '{}': {error}",
                path.display()
            ),
        )
    })
}
