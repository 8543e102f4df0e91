// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Railyard Command Line
//!
//! Reads an instance from a file or stdin, schedules every good and writes
//! the report to stdout. Diagnostics (structured logs, optional statistics)
//! go to stderr and never influence the report.

use clap::{Parser, ValueEnum};
use railyard_model::loading::{InstanceLoader, InstanceLoaderError};
use railyard_router::{
    fixed_lane::FixedLaneSearch, search::LaneSwitchingSearch, strategy::RouteStrategy,
};
use railyard_solver::{
    monitor::log::LogMonitor,
    order::GoodOrder,
    scheduler::SchedulerBuilder,
    stats::ScheduleStatistics,
    validation::audit,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Load(InstanceLoaderError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Load(e) => write!(f, "invalid instance: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Load(e) => Some(e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<InstanceLoaderError> for CliError {
    fn from(e: InstanceLoaderError) -> Self {
        CliError::Load(e)
    }
}

/// Processing order accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderArg {
    #[default]
    Heaviest,
    Lightest,
    Input,
}

impl From<OrderArg> for GoodOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Heaviest => GoodOrder::HeaviestFirst,
            OrderArg::Lightest => GoodOrder::LightestFirst,
            OrderArg::Input => GoodOrder::InputOrder,
        }
    }
}

/// Route search used for every good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyArg {
    /// Minimum hops, may change lane at every station.
    #[default]
    LaneSwitching,
    /// Minimum hops on a single lane, lowest lane first.
    FixedLane,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "railyard")]
#[command(about = "Routes goods through a multi-lane railyard network", long_about = None)]
pub struct Cli {
    /// Instance file ("-" or omitted for stdin)
    pub input: Option<PathBuf>,

    /// Order in which goods claim lanes and pickers
    #[arg(long, value_enum, default_value_t = OrderArg::Heaviest)]
    pub order: OrderArg,

    /// Route search strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::LaneSwitching)]
    pub strategy: StrategyArg,

    /// Print run statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the default log filter directive for the verbosity level.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Returns the input path, or `None` when reading stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

/// Schedules the instance read from `input`, writes the report to `out` and,
/// if requested, the statistics to `diagnostics`.
pub fn run<R, O, D>(
    input: R,
    out: &mut O,
    diagnostics: &mut D,
    cli: &Cli,
) -> Result<ScheduleStatistics, CliError>
where
    R: BufRead,
    O: Write,
    D: Write,
{
    let instance = InstanceLoader::<f64>::new().from_bufread(input)?;
    info!(instance = %instance, "instance loaded");

    let num_stations = instance.network().num_stations();
    let mut strategy: Box<dyn RouteStrategy<f64>> = match cli.strategy {
        StrategyArg::LaneSwitching => Box::new(LaneSwitchingSearch::preallocated(num_stations)),
        StrategyArg::FixedLane => Box::new(FixedLaneSearch::preallocated(num_stations)),
    };

    let scheduler = SchedulerBuilder::new().order(cli.order.into()).build();
    let outcome = scheduler.arrange(&instance, strategy.as_mut(), &mut LogMonitor::new());

    for violation in audit(instance.network(), outcome.state()) {
        warn!(%violation, "resource state violation");
    }

    outcome.report(&instance).write_to(out)?;
    if cli.stats {
        write!(diagnostics, "{}", outcome.statistics())?;
        diagnostics.flush()?;
    }

    Ok(outcome.statistics().clone())
}

/// Runs the command line against the process's stdin, stdout and stderr.
pub fn execute(cli: &Cli) -> Result<ScheduleStatistics, CliError> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut diagnostics = stderr.lock();

    match cli.input_path() {
        Some(path) => {
            let file = File::open(path)?;
            run(BufReader::new(file), &mut out, &mut diagnostics, cli)
        }
        None => run(io::stdin().lock(), &mut out, &mut diagnostics, cli),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("railyard").chain(args.iter().copied())).unwrap()
    }

    fn run_text(text: &str, cli: &Cli) -> (String, String) {
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();
        run(text.as_bytes(), &mut out, &mut diagnostics, cli).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(diagnostics).unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.order, OrderArg::Heaviest);
        assert_eq!(cli.strategy, StrategyArg::LaneSwitching);
        assert!(!cli.stats);
        assert_eq!(cli.log_directive(), "warn");
        assert!(cli.input_path().is_none());
    }

    #[test]
    fn test_parses_options() {
        let cli = cli(&[
            "yard.txt",
            "--order",
            "lightest",
            "--strategy",
            "fixed-lane",
            "--stats",
            "-vv",
        ]);
        assert_eq!(cli.input_path(), Some(Path::new("yard.txt")));
        assert_eq!(GoodOrder::from(cli.order), GoodOrder::LightestFirst);
        assert_eq!(cli.strategy, StrategyArg::FixedLane);
        assert!(cli.stats);
        assert_eq!(cli.log_directive(), "debug");
    }

    #[test]
    fn test_dash_means_stdin() {
        assert!(cli(&["-"]).input_path().is_none());
        assert!(Cli::try_parse_from(["railyard", "--order", "random"]).is_err());
    }

    #[test]
    fn test_routed_scenario() {
        let (out, diagnostics) = run_text(
            "2,1,2,10\nA,5\nB,5\nE1,A,B\n1\nG1,A,B,4,null\n",
            &cli(&[]),
        );
        assert_eq!(out, "0,0.000\nG1\nE1\n1\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_overweight_scenario() {
        let (out, _) = run_text(
            "2,1,2,10\nA,5\nB,5\nE1,A,B\n1\nG1,A,B,15,null\n",
            &cli(&[]),
        );
        assert_eq!(out, "1,15.000\nG1\nnull\nnull\n");
    }

    #[test]
    fn test_missing_pickers_scenario() {
        let (out, _) = run_text(
            "2,1,4,10\nA,0\nB,5\nE1,A,B\n1\nG1,A,B,1,null\n",
            &cli(&["--strategy", "fixed-lane"]),
        );
        assert_eq!(out, "1,1.000\nG1\nnull\nnull\n");
    }

    #[test]
    fn test_stats_go_to_diagnostics() {
        let (out, diagnostics) = run_text(
            "2,1,1,10\nA,5\nB,5\nE1,A,B\n2\nG1,A,B,4,null\nG2,B,A,4,null\n",
            &cli(&["--stats", "--order", "input"]),
        );
        assert_eq!(out, "0,0.000\nG1\nE1\n1\nG2\nE1\n1\n");
        assert!(diagnostics.contains("Routed:               2"));
        assert!(diagnostics.contains("Pickers Placed:       2"));
    }

    #[test]
    fn test_sample_instance_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/network-1.txt");
        let file = File::open(path).unwrap();
        let mut out = Vec::new();
        let stats = run(BufReader::new(file), &mut out, &mut io::sink(), &cli(&[])).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1 + 3 * 8);
        assert!(out.contains("G7\nnull\nnull\n"));
        assert!(out.contains("G6\n\n\n"));
        assert_eq!(stats.goods, 8);
        assert_eq!(stats.trivial, 1);
        assert_eq!(stats.skipped_waypoints, 1);
    }

    #[test]
    fn test_load_errors_are_reported() {
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();
        let result = run(
            "2,1,2,10\nA,5\nB,5\nE1,A,Q\n0\n".as_bytes(),
            &mut out,
            &mut diagnostics,
            &cli(&[]),
        );
        assert!(matches!(result, Err(CliError::Load(_))));
        assert!(out.is_empty());
    }
}
