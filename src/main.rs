use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repeater::args::ArgsSource;
use repeater::consts::{DEFAULT_LOG_LEVEL, LOG_ENV};
use repeater::invoke::load_and_invoke;

#[derive(Parser)]
#[command(name = "repeater", version, about = "Repeat a message, the automation-module way.")]
struct Cli {
    /// JSON arguments file written by the host (`-` or omitted reads stdin)
    args_file: Option<PathBuf>,

    /// Log filter used when REPEATER_LOG is unset (logs go to stderr)
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Pretty-print the JSON result
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the host; logs must stay on stderr
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let source = ArgsSource::from_path(cli.args_file);
    let response = load_and_invoke(&source);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response.to_json(cli.pretty)?)?;
    stdout.flush()?;

    let code = response.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
