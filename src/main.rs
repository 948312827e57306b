//! Command-line access to display-name bundles.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use cldr_display_names::config::{
    ConfigError,
    ConfigManager,
};
use cldr_display_names::input::load_bundle_file;
use cldr_display_names::{
    BundleId,
    Category,
    DataError,
    LookupError,
    Registry,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "display-names")]
#[command(version)]
#[command(about = "Look up CLDR display names for currencies, locales and time zones")]
struct Cli {
    /// Directory containing `.display-names.json` (default: current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available bundles
    List {
        /// Only bundles of this category
        #[arg(short, long, value_enum)]
        category: Option<Category>,
    },

    /// Print a bundle as an ordered JSON object
    Show {
        /// Bundle id, e.g. CurrencyNames_lag
        #[arg(value_name = "BUNDLE")]
        bundle: BundleId,
    },

    /// Print the value of one key
    Lookup {
        #[arg(value_name = "BUNDLE")]
        bundle: BundleId,

        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Validate bundle files
    Check {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Bundle {0} not found")]
    UnknownBundle(BundleId),

    #[error("{0} of {1} bundle files failed validation")]
    CheckFailed(usize, usize),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`), and optionally
/// to a file. The returned guard flushes the file writer on drop.
fn init_logging(log_file: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().map_or_else(|| "display-names.log".into(), ToOwned::to_owned);
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(filter).with(stderr_layer).with(file_layer).init();
    guard
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ConfigManager::new();
    let workspace = match cli.workspace {
        Some(dir) => Some(dir),
        None => std::env::current_dir().ok(),
    };
    config.load_settings(workspace)?;

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::List { category } => {
            let registry = Registry::load(&config)?;
            for bundle in registry.bundles() {
                if category.is_some_and(|c| c != bundle.id().category) {
                    continue;
                }
                writeln!(out, "{}\t{}", bundle.id(), bundle.len())?;
            }
        }
        Commands::Show { bundle } => {
            let registry = Registry::load(&config)?;
            let bundle = registry.get(&bundle).ok_or(CliError::UnknownBundle(bundle))?;
            serde_json::to_writer_pretty(&mut out, bundle)?;
            writeln!(out)?;
        }
        Commands::Lookup { bundle, key } => {
            let registry = Registry::load(&config)?;
            let bundle = registry.get(&bundle).ok_or(CliError::UnknownBundle(bundle))?;
            let value = bundle.lookup(&key)?;
            serde_json::to_writer(&mut out, &value)?;
            writeln!(out)?;
        }
        Commands::Check { paths } => {
            let total = paths.len();
            let mut failed = 0;
            for path in &paths {
                match load_bundle_file(path) {
                    Ok(bundle) => writeln!(out, "ok\t{}\t{} entries", path.display(), bundle.len())?,
                    Err(e) => {
                        failed += 1;
                        writeln!(out, "error\t{e}")?;
                    }
                }
            }
            if failed > 0 {
                return Err(CliError::CheckFailed(failed, total));
            }
        }
    }

    Ok(())
}
