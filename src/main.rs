mod prompt;
mod report;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use beamx::{render_comparison_chart, ChartTarget, LogError, ResultLog, DEFAULT_LOG_PATH};
use clap::Parser;
use prompt::Prompter;
use report::{render_entry, NO_RESULTS};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "beamx")]
#[command(about = "Cantilever tube deflection calculator")]
struct Cli {
    /// Results log to append to and plot from.
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,
    /// Save the chart to this file instead of opening it.
    #[arg(long, conflicts_with = "no_plot")]
    output: Option<PathBuf>,
    /// Do not draw the chart.
    #[arg(long)]
    no_plot: bool,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with the prompts on stdout.
    // Verbosity follows RUST_LOG and defaults to warnings only.
    init_tracing();
    let cli = Cli::parse();
    let log = ResultLog::new(cli.log);

    // Ask for one beam at a time, report its tip deflection and record it.
    // The deflection combines the point load at the tip with the beam's own
    // weight, see https://en.wikipedia.org/wiki/Deflection_(engineering).
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    collect_results(&mut prompter, &log)?;

    // Compare every result recorded so far, including earlier sessions, in a
    // single bar chart ordered from stiffest to most flexible beam.
    if cli.no_plot {
        return Ok(());
    }
    let target = cli.output.map_or(ChartTarget::Window, ChartTarget::File);
    plot_results(&log, &target, &mut io::stdout())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run the prompt loop, logging each new result, until the user stops.
fn collect_results<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    log: &ResultLog,
) -> Result<()> {
    loop {
        let spec = prompter.read_beam().context("cannot read beam parameters")?;
        if let Err(error) = spec.validate() {
            warn!(%error, "beam is not physical, the result will be degenerate");
        }

        let result = spec.evaluate();
        prompter.say(&render_entry(&result))?;

        match log.append_if_new(&result) {
            Ok(true) => {}
            Ok(false) => info!("identical result already in the log"),
            Err(error @ LogError::NonFinite { .. }) => warn!(%error),
            Err(error) => return Err(error).context("cannot record result"),
        }

        if !prompter.ask_continue()? {
            return Ok(());
        }
    }
}

/// Plot everything in the log. A missing or empty log is reported to `out`,
/// not treated as an error.
fn plot_results(log: &ResultLog, target: &ChartTarget, out: &mut impl Write) -> Result<()> {
    let results = match log.load_all() {
        Ok(results) => results,
        Err(LogError::Missing(_)) => Vec::new(),
        Err(error) => return Err(error).context("cannot load results for plotting"),
    };
    info!(count = results.len(), "loaded results");
    if results.is_empty() {
        writeln!(out, "{NO_RESULTS}")?;
        return Ok(());
    }
    render_comparison_chart(&results, target).context("cannot draw comparison chart")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(input: &str, log: &ResultLog) -> Result<String> {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), &mut output);
        collect_results(&mut prompter, log)?;
        drop(prompter);
        Ok(String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn repeated_entry_is_logged_once() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));
        let entry = "steel\n1\n5\n5\n200\n7850\n";

        let transcript = run(&format!("{entry}yes\n{entry}no\n"), &log).expect("session runs");
        assert_eq!(transcript.matches("The calculated deflection is:").count(), 2);

        let contents = fs::read_to_string(log.path()).expect("log written");
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(log.load_all().expect("log parses").len(), 1);
    }

    #[test]
    fn results_from_earlier_runs_are_kept() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));

        run("steel\n1\n5\n5\n200\n7850\nno\n", &log).expect("first run");
        run("aluminium\n1\n5\n5\n69\n2700\nno\n", &log).expect("second run");

        let materials: Vec<String> = log
            .load_all()
            .expect("log parses")
            .into_iter()
            .filter_map(|result| result.material)
            .collect();
        assert_eq!(materials, vec!["steel", "aluminium"]);
    }

    #[test]
    fn infinite_result_is_printed_but_not_logged() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));

        let transcript = run("ghost\n1\n5\n5\n0\n7850\nno\n", &log).expect("session runs");
        assert!(transcript.contains("The calculated deflection is: inf meters"));
        assert!(!log.path().exists());
    }

    #[test]
    fn bad_number_aborts_the_session() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));
        assert!(run("steel\nlong\n", &log).is_err());
        assert!(!log.path().exists());
    }

    #[test]
    fn missing_log_is_not_fatal() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));
        let chart = dir.path().join("chart.svg");
        let mut out = Vec::new();
        plot_results(&log, &ChartTarget::File(chart.clone()), &mut out)
            .expect("missing log is reported, not fatal");
        assert_eq!(
            String::from_utf8(out).expect("utf-8 output"),
            format!("{NO_RESULTS}\n")
        );
        assert!(!chart.exists());
    }

    #[test]
    fn empty_log_is_reported_like_a_missing_one() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));
        fs::write(log.path(), "\n\n").expect("seed log");
        let mut out = Vec::new();
        plot_results(&log, &ChartTarget::Window, &mut out).expect("empty log is not fatal");
        assert_eq!(
            String::from_utf8(out).expect("utf-8 output"),
            "No deflection results found to plot.\n"
        );
    }

    #[test]
    fn malformed_log_is_fatal() {
        let dir = TempDir::new().expect("temp dir");
        let log = ResultLog::new(dir.path().join("results.txt"));
        fs::write(log.path(), "{'deflection': 0.001}\n").expect("seed log");
        let mut out = Vec::new();
        assert!(plot_results(&log, &ChartTarget::Window, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn flags_default_to_interactive_run() {
        let cli = Cli::parse_from(["beamx"]);
        assert_eq!(cli.log, PathBuf::from(DEFAULT_LOG_PATH));
        assert!(cli.output.is_none());
        assert!(!cli.no_plot);

        let cli = Cli::parse_from(["beamx", "--log", "other.txt", "--output", "chart.svg"]);
        assert_eq!(cli.log, PathBuf::from("other.txt"));
        assert_eq!(cli.output, Some(PathBuf::from("chart.svg")));
        assert!(Cli::try_parse_from(["beamx", "--output", "a.svg", "--no-plot"]).is_err());
    }
}
