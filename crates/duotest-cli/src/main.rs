use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use duotest::{Console, RunSummary, RuntimeSuite};
use duotest_config::{ColorChoice, Config, ConfigLoader, HarnessConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod demo;

use demo::{add, complex, takes_a_sec, using_verify, Fixture};

/// Run the bundled duotest demo groups.
///
/// Every group runs the same kind of test bodies: plain functions, fixture
/// methods against a fresh fixture, and `const fn` tests forced through
/// constant evaluation at build time. The exit status is the number of
/// failed tests.
///
/// EXAMPLES:
///     duotest                      Run every group
///     duotest plain fixture        Run selected groups
///     duotest --quiet --no-color   Only PASSED/FAILED lines, uncoloured
///
/// ENVIRONMENT VARIABLES:
///     DUOTEST_COLOR     auto, always or never
///     DUOTEST_PROGRESS  Set to 'false' to hide "Running <name>..." lines
///     NO_COLOR          Set to disable colored output
///     RUST_LOG          Log filter (default: warn)
#[derive(Parser)]
#[command(name = "duotest")]
#[command(version)]
struct Cli {
    /// Groups to run (default: all, in order)
    #[arg(value_enum)]
    groups: Vec<Group>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Hide "Running <name>..." lines
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Configuration file (default: duotest.toml in this or a parent directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// A demo group
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Group {
    /// Plain tests, one fresh suite per call
    Plain,
    /// Fixture tests, one fresh suite per call
    Fixture,
    /// Fixture and plain tests sharing one suite
    Shared,
    /// Tests forced through constant evaluation
    Const,
}

impl Group {
    const ALL: [Group; 4] = [Group::Plain, Group::Fixture, Group::Shared, Group::Const];

    fn run(self, harness: &HarnessConfig) -> RunSummary {
        log::debug!("running group {:?}", self);
        match self {
            Group::Plain => {
                let suite = RuntimeSuite::from_config(harness);
                let summary = duotest::test_all_in!(&suite, add, takes_a_sec, using_verify);
                summary
            }
            Group::Fixture => {
                let suite = RuntimeSuite::from_config(harness);
                let summary = duotest::test_fixture_in!(&suite, Fixture; &Fixture::add);
                summary
            }
            Group::Shared => {
                let suite = RuntimeSuite::from_config(harness);
                let fixture = duotest::test_fixture_in!(&suite, Fixture; &Fixture::add);
                let plain = duotest::test_all_in!(&suite, add);
                fixture.merge(plain)
            }
            Group::Const => {
                let plain = duotest::test_all_const!(add, complex);
                let fixture =
                    duotest::test_fixture_const!(Fixture = Fixture::new(); Fixture::add);
                plain.merge(fixture)
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    let loader = ConfigLoader::new();
    let config: Config = match &cli.config {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => loader
            .load_from_directory(&std::env::current_dir()?)
            .context("Failed to load duotest.toml")?,
    };
    if let Some(path) = &config.config_path {
        log::debug!("using configuration from {}", path.display());
    }

    // Command-line flags override file and environment
    let mut harness = config.harness;
    if cli.no_color {
        harness.set_color(ColorChoice::Never);
    }
    if cli.quiet {
        harness.set_progress(false);
    }
    Ok(harness)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let harness = load_config(&cli)?;

    // Auto leaves colour to `colored`'s own terminal detection
    if let Some(force) = harness.color().forced() {
        colored::control::set_override(force);
    }
    Console::from_config(&harness).install();

    let groups: &[Group] = if cli.groups.is_empty() {
        &Group::ALL
    } else {
        &cli.groups
    };

    let total = groups
        .iter()
        .map(|group| group.run(&harness))
        .fold(RunSummary::default(), RunSummary::merge);
    log::info!("{} tests run, {} failed", total.ran, total.fail_count);

    Ok(ExitCode::from(u8::try_from(total.fail_count).unwrap_or(u8::MAX)))
}
