use beamx::{format_float, DeflectionResult};
use std::fmt::Write;

/// Message printed when there is no log to plot.
pub const NO_RESULTS: &str = "No deflection results found to plot.";

/// Render the lines printed after each calculation.
///
/// The deflection is printed with every digit that survives a round trip so it
/// can be compared exactly with the logged value.
#[must_use]
pub fn render_entry(result: &DeflectionResult) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "The calculated deflection is: {} meters",
        format_float(result.deflection)
    )
    .expect("writing to string cannot fail");

    // The record calls this field weight, but it holds the mass.
    writeln!(&mut output, "Beam mass: {:.2} kg", result.weight)
        .expect("writing to string cannot fail");

    output
}
