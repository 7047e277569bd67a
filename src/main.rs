use adjustment_report::{AdjustmentReport, NetworkSnapshot, ReportConfig, ReportResult};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "adjustment-report",
    version,
    about = "Write the XML adjustment report of a solved local network"
)]
struct Cli {
    /// JSON snapshot of the solved network.
    #[arg(long)]
    input: PathBuf,
    /// JSON report configuration (output precision).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report file, standard output when absent.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print coordinates and observations with 16 decimals.
    #[arg(long)]
    max_precision: bool,
}

/// Log to stderr so that stdout carries only the report
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);

    // a subscriber installed by the host wins
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

fn run(cli: &Cli) -> ReportResult<()> {
    let config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    let network = NetworkSnapshot::from_file(&cli.input)?;

    let mut report = AdjustmentReport::new(&network).with_config(config);
    if cli.max_precision {
        report = report.with_max_precision(true);
    }

    match &cli.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            report.write(&mut out)
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            report.write(&mut out)
        }
    }
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
