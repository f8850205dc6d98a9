//! The result record and its one-line text form.

use serde::{Deserialize, Serialize};

use crate::errors::LogError;

/// Outcome of one deflection calculation, in SI units.
///
/// Field order is significant: it fixes the order of keys in the log line,
/// and two results are the same log entry only if every field matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeflectionResult {
    /// Tip deflection in metres.
    pub deflection: f64,
    /// Material name, if one was given.
    pub material: Option<String>,
    /// Beam length in metres.
    pub length: f64,
    /// Beam mass in kilograms.
    pub weight: f64,
    /// Outer diameter in metres.
    pub diameter: f64,
    /// Wall thickness in metres.
    pub thickness: f64,
    /// Elastic modulus in pascals.
    pub elasticity: f64,
}

impl DeflectionResult {
    /// Label used for the material in charts and reports.
    #[must_use]
    pub fn material_label(&self) -> &str {
        self.material.as_deref().unwrap_or("None")
    }

    /// Encode the result as a single log line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NonFinite`] when a numeric field is NaN or infinite
    /// and [`LogError::Encode`] if serialization fails.
    ///
    /// # Examples
    /// ```
    /// use beamx::DeflectionResult;
    ///
    /// let result = DeflectionResult {
    ///     deflection: 0.001,
    ///     material: Some("steel".into()),
    ///     length: 1.0,
    ///     weight: 5.5,
    ///     diameter: 0.05,
    ///     thickness: 0.005,
    ///     elasticity: 200.0e9,
    /// };
    /// let line = result.to_line().expect("finite result encodes");
    /// assert!(line.starts_with(r#"{"deflection":0.001,"material":"steel","length":1.0,"#));
    /// assert_eq!(DeflectionResult::from_line(&line).expect("line parses"), result);
    /// ```
    pub fn to_line(&self) -> Result<String, LogError> {
        self.check_finite()?;
        serde_json::to_string(self).map_err(LogError::Encode)
    }

    /// Decode a log line produced by [`DeflectionResult::to_line`].
    ///
    /// # Errors
    ///
    /// Returns the parser error when the line is not a JSON object with exactly
    /// the fields of a [`DeflectionResult`].
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    /// Name and value of every numeric field, in log order.
    fn numeric_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("deflection", self.deflection),
            ("length", self.length),
            ("weight", self.weight),
            ("diameter", self.diameter),
            ("thickness", self.thickness),
            ("elasticity", self.elasticity),
        ]
    }

    /// Reject values that JSON cannot carry.
    fn check_finite(&self) -> Result<(), LogError> {
        match self
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            Some((field, value)) => Err(LogError::NonFinite { field, value }),
            None => Ok(()),
        }
    }
}
