//! Error types produced while checking beams, logging results or drawing charts.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when the parameters of a [`BeamSpec`](crate::BeamSpec) are not
/// physically meaningful.
///
/// The calculator itself never rejects inputs; these variants only come out of
/// [`BeamSpec::validate`](crate::BeamSpec::validate) so callers can warn users
/// about degenerate results.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BeamSpecError {
    /// Returned when the beam length is zero or negative.
    #[error("length must be positive (received {length} m)")]
    NonPositiveLength {
        /// Rejected length in metres.
        length: f64,
    },
    /// Returned when the outer diameter is zero or negative.
    #[error("outer diameter must be positive (received {diameter} m)")]
    NonPositiveDiameter {
        /// Rejected outer diameter in metres.
        diameter: f64,
    },
    /// Returned when the wall thickness is zero or negative.
    #[error("wall thickness must be positive (received {thickness} m)")]
    NonPositiveThickness {
        /// Rejected wall thickness in metres.
        thickness: f64,
    },
    /// Returned when the wall is at least as thick as the outer radius.
    #[error("wall thickness {thickness} m must be less than half the diameter {diameter} m")]
    WallTooThick {
        /// Rejected wall thickness in metres.
        thickness: f64,
        /// Outer diameter in metres.
        diameter: f64,
    },
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {elastic_modulus} Pa)")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus in pascals.
        elastic_modulus: f64,
    },
    /// Returned when the material density is zero or negative.
    #[error("density must be positive (received {density} kg/m^3)")]
    NonPositiveDensity {
        /// Rejected density in kilograms per cubic metre.
        density: f64,
    },
}

/// Error returned by [`ResultLog`](crate::ResultLog) operations.
#[derive(Debug, Error)]
pub enum LogError {
    /// Returned when the log file cannot be read or written.
    #[error("cannot access result log {path}: {source}")]
    Io {
        /// Path of the log file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when loading a log file that does not exist.
    #[error("result log {0} does not exist")]
    Missing(PathBuf),
    /// Returned when a record cannot be encoded as a log line.
    #[error("cannot encode result: {0}")]
    Encode(#[source] serde_json::Error),
    /// Returned when a line of the log is not a valid record.
    #[error("line {line} of the result log is malformed: {source}")]
    Malformed {
        /// One-based line number of the offending line.
        line: usize,
        /// Parser error describing the problem.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when a record holds a NaN or infinite value, which would not
    /// survive a round trip through the log.
    #[error("field `{field}` is not finite ({value}); result not logged")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The non-finite value.
        value: f64,
    },
}

/// Error returned when the comparison chart cannot be produced.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlotError {
    /// Returned when there is nothing to draw.
    #[error("no results to plot")]
    Empty,
    /// Returned when the plotting backend fails.
    #[error("plotting failed: {0}")]
    Backend(String),
}
