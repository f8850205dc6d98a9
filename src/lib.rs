#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod beam;
pub mod chart;
pub mod errors;
pub mod log;
pub mod record;
pub mod section;

pub use beam::{
    mass_and_weight, point_load_deflection, self_weight_deflection, total_deflection, BeamSpec,
    GRAVITY, TIP_MASS,
};
pub use chart::{
    format_float, format_scientific, render_comparison_chart, Bar, ChartTarget, ComparisonChart,
};
pub use errors::{BeamSpecError, LogError, PlotError};
pub use log::{ResultLog, DEFAULT_LOG_PATH};
pub use record::DeflectionResult;
pub use section::{cross_section_area, second_moment_of_area, tube, TubeSection};
