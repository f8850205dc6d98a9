//! Bar chart comparing logged deflections.
//!
//! [`ComparisonChart`] is a plain description of the bars, labels and legend.
//! Drawing goes through `plotpy`, which writes a matplotlib script and runs it
//! with Python, so only [`ComparisonChart::save`] and [`ComparisonChart::show`]
//! need a Python installation.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use plotpy::{Barplot, Plot, Text};
use tracing::info;
use uom::si::f64::Pressure;
use uom::si::pressure::{gigapascal, pascal};

use crate::errors::PlotError;
use crate::record::DeflectionResult;

/// Chart title.
const TITLE: &str = "Beam Deflection by Material / Thickness";
/// Horizontal axis label.
const X_LABEL: &str = "Material (thickness)";
/// Vertical axis label.
const Y_LABEL: &str = "Deflection (m)";
/// File name used when the chart is only shown, not kept.
const PREVIEW_FILE: &str = "beamx_comparison.svg";

/// matplotlib's `tab10` qualitative palette.
const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// One bar of the comparison chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    /// Horizontal position of the bar centre.
    pub position: f64,
    /// Bar height, the tip deflection in metres.
    pub deflection: f64,
    /// Two-line tick label: material, then thickness.
    pub tick_label: String,
    /// Value printed above the bar.
    pub annotation: String,
    /// Legend entry describing the beam.
    pub legend_label: String,
    /// Fill colour as a hex string.
    pub color: &'static str,
}

/// Where a rendered chart goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartTarget {
    /// Open the figure for viewing.
    Window,
    /// Write the figure to a file; the format follows the extension.
    File(PathBuf),
}

/// Bars for a set of results, ordered from smallest to largest deflection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComparisonChart {
    /// Bars from left to right.
    bars: Vec<Bar>,
}

impl ComparisonChart {
    /// Lay out one bar per result.
    ///
    /// The sort is stable, so results with equal deflection keep their log order.
    ///
    /// # Examples
    /// ```
    /// use beamx::{total_deflection, ComparisonChart};
    ///
    /// let stiff = total_deflection(7850.0, 1.0, 200.0e9, 0.005, 0.05, Some("steel"));
    /// let soft = total_deflection(2700.0, 1.0, 69.0e9, 0.005, 0.05, Some("aluminium"));
    /// let chart = ComparisonChart::new(&[soft, stiff]);
    /// assert_eq!(chart.bars()[0].tick_label, "steel\n0.005 m");
    /// ```
    #[must_use]
    pub fn new(results: &[DeflectionResult]) -> Self {
        let mut sorted: Vec<&DeflectionResult> = results.iter().collect();
        sorted.sort_by(|a, b| a.deflection.total_cmp(&b.deflection));

        let count = sorted.len();
        let bars = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, result)| Bar {
                position: idx as f64,
                deflection: result.deflection,
                tick_label: tick_label(result),
                annotation: format_scientific(result.deflection, 4),
                legend_label: legend_label(result),
                color: palette_color(idx, count),
            })
            .collect();
        Self { bars }
    }

    /// Bars from left to right.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Return `true` when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Build the figure.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::Empty`] when the chart has no bars.
    pub fn draw(&self) -> Result<Plot, PlotError> {
        if self.is_empty() {
            return Err(PlotError::Empty);
        }

        let mut plot = Plot::new();
        for bar in &self.bars {
            let mut barplot = Barplot::new();
            barplot
                .set_colors(&[bar.color])
                .draw(&vec![bar.position], &vec![bar.deflection]);
            plot.add(&barplot);

            let mut text = Text::new();
            text.set_align_horizontal("center")
                .set_align_vertical("bottom")
                .set_fontsize(8.0)
                .draw(bar.position, bar.deflection, &bar.annotation);
            plot.add(&text);
        }

        plot.extra(&self.axis_commands())
            .set_title(TITLE)
            .set_label_x(X_LABEL)
            .set_label_y(Y_LABEL)
            .set_figure_size_points(720.0, 432.0);
        // Layout has to run last, once the legend box exists.
        plot.extra(&self.legend_commands());
        Ok(plot)
    }

    /// Write the figure to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError`] when the chart is empty or Python fails.
    pub fn save(&self, path: &Path) -> Result<(), PlotError> {
        info!(bars = self.bars.len(), path = %path.display(), "saving comparison chart");
        self.draw()?.save(path).map_err(backend_error)
    }

    /// Render the figure and open it in the system viewer.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError`] when the chart is empty or Python fails.
    pub fn show(&self) -> Result<(), PlotError> {
        let path = std::env::temp_dir().join(PREVIEW_FILE);
        info!(bars = self.bars.len(), path = %path.display(), "showing comparison chart");
        self.draw()?.show(&path).map_err(backend_error)
    }

    /// Render to the requested target.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError`] when the chart is empty or Python fails.
    pub fn render(&self, target: &ChartTarget) -> Result<(), PlotError> {
        match target {
            ChartTarget::Window => self.show(),
            ChartTarget::File(path) => self.save(path),
        }
    }

    /// matplotlib commands for tick labels and the horizontal grid.
    fn axis_commands(&self) -> String {
        let positions: Vec<String> = self
            .bars
            .iter()
            .map(|bar| format!("{}", bar.position))
            .collect();
        let labels: Vec<String> = self
            .bars
            .iter()
            .map(|bar| python_string(&bar.tick_label))
            .collect();

        let mut commands = String::new();
        writeln!(
            &mut commands,
            "plt.xticks([{}], [{}])",
            positions.join(", "),
            labels.join(", ")
        )
        .expect("writing to string cannot fail");
        commands.push_str("plt.grid(axis='y', linestyle='--', alpha=0.7)\n");
        commands
    }

    /// matplotlib commands for the legend outside the axes and the final layout.
    ///
    /// Each bar is one patch, so the labels pair with `plt.gca().patches` in order.
    fn legend_commands(&self) -> String {
        let labels: Vec<String> = self
            .bars
            .iter()
            .map(|bar| python_string(&bar.legend_label))
            .collect();

        let mut commands = String::new();
        writeln!(
            &mut commands,
            "plt.legend(plt.gca().patches, [{}], loc='upper left', bbox_to_anchor=(1, 1))",
            labels.join(", ")
        )
        .expect("writing to string cannot fail");
        commands.push_str("plt.tight_layout()\n");
        commands
    }
}

/// Sort `results` and draw them to `target`.
///
/// # Errors
///
/// Returns [`PlotError::Empty`] for an empty slice and
/// [`PlotError::Backend`] when rendering fails.
pub fn render_comparison_chart(
    results: &[DeflectionResult],
    target: &ChartTarget,
) -> Result<(), PlotError> {
    ComparisonChart::new(results).render(target)
}

/// Format a float the way a round-trip `repr` does: shortest exact digits,
/// always with a fractional part for whole numbers, and scientific notation
/// with a signed two-digit exponent below `1e-4` or from `1e16` up.
///
/// # Examples
/// ```
/// use beamx::format_float;
///
/// assert_eq!(format_float(1.0), "1.0");
/// assert_eq!(format_float(0.05), "0.05");
/// assert_eq!(format_float(1.0e-5), "1e-05");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    pad_exponent(&format!("{value:?}"))
}

/// Scientific notation with a signed, at least two-digit exponent, e.g.
/// `6.3915e-04`.
///
/// # Examples
/// ```
/// use beamx::format_scientific;
///
/// assert_eq!(format_scientific(0.00063915279, 4), "6.3915e-04");
/// assert_eq!(format_scientific(12345.0, 2), "1.23e+04");
/// ```
#[must_use]
pub fn format_scientific(value: f64, decimals: usize) -> String {
    pad_exponent(&format!("{value:.decimals$e}"))
}

/// Rewrite a Rust exponent such as `e-5` or `e16` as `e-05` or `e+16`.
fn pad_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted.to_owned(),
    }
}

/// `"material\nthickness m"` with the thickness to the millimetre.
fn tick_label(result: &DeflectionResult) -> String {
    format!("{}\n{:.3} m", result.material_label(), result.thickness)
}

/// Legend text listing the beam's length, diameter, modulus and mass.
fn legend_label(result: &DeflectionResult) -> String {
    let modulus = Pressure::new::<pascal>(result.elasticity).get::<gigapascal>();
    format!(
        "{}: L={}m, D={}m, E={}GPa, W={:.2}kg",
        result.material_label(),
        format_float(result.length),
        format_float(result.diameter),
        format_float(modulus),
        result.weight
    )
}

/// Sample `tab10` evenly across `count` bars.
fn palette_color(idx: usize, count: usize) -> &'static str {
    let fraction = idx as f64 / count.saturating_sub(1).max(1) as f64;
    let slot = ((fraction * TAB10.len() as f64) as usize).min(TAB10.len() - 1);
    TAB10[slot]
}

/// Quote `text` as a Python string literal.
fn python_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

/// Wrap a plotpy failure.
fn backend_error(message: &'static str) -> PlotError {
    PlotError::Backend(message.to_owned())
}
