use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::debug;

use fx_core::KeyValueRepository;
use fx_ui::app::{self, App};
use fx_ui::config::FxConfig;
use fx_ui::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Currency transfer and term-deposit calculator.
///
/// Opens a page, applies the given change events in order and prints the
/// page. Transfer inputs are saved between runs.
#[derive(Debug, Parser)]
#[command(name = "fx-calc", version)]
struct Cli {
    /// Page path (`/`, `/calc1`, `/calc2`) followed by `FIELD=VALUE` change
    /// events, e.g. `/calc1 amt=1000 sellRate=1.35`.
    #[arg(value_name = "PATH | FIELD=VALUE")]
    args: Vec<String>,

    /// Keep reading `FIELD=VALUE` lines (or `/PATH`, `quit`) from stdin.
    #[arg(short, long)]
    interactive: bool,

    /// Forget the saved transfer inputs before opening the page.
    #[arg(long)]
    reset: bool,

    /// Storage backend to use [default: sqlite].
    #[arg(long)]
    backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `fx-calc.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// TOML config file; its values are used where no flag is given.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `fx_core=trace` [default: info].
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> FxConfig {
        FxConfig {
            backend: self.backend.clone(),
            db: self.db.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FxConfig::load(path)?,
        None => FxConfig::default(),
    };
    let config = cli.overrides().or(file_config);

    if let Some(level) = &config.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }

    let (route, changes) = app::parse_invocation(&cli.args)?;

    let db_config = config.db_config();
    debug!("connecting to {} backend", db_config.backend);
    let storage: Arc<dyn KeyValueRepository> = app::build_registry()
        .create(&db_config)
        .await
        .with_context(|| format!("cannot open {} storage '{}'", db_config.backend, db_config.connection_string))?
        .into();

    let mut app = App::open(storage, route).await?;
    if cli.reset {
        app.reset_saved_inputs().await?;
    }
    for change in &changes {
        app.apply(change).await?;
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(app.render().as_bytes()).await?;
    stdout.flush().await?;

    if cli.interactive {
        app::run_interactive(&mut app, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
    }

    Ok(())
}
