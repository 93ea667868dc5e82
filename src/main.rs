use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conduit_grid::config::EXAMPLE_CONFIG;
use conduit_grid::ui::install_panic_hook;
use conduit_grid::{util, App, Config, ThemeTokens};

/// Interactive grid of simulated agent branches
#[derive(Debug, Parser)]
#[command(name = "conduit-grid", version, about)]
struct Args {
    /// Number of agents to start with
    #[arg(long, default_value_t = 4)]
    agents: usize,

    /// Narrowest allowed column, in terminal cells
    #[arg(long)]
    min_column_width: Option<u16>,

    /// Upper bound on the number of columns
    #[arg(long)]
    max_columns: Option<usize>,

    /// Built-in theme (default-dark, default-light)
    #[arg(long)]
    theme: Option<String>,

    /// Config file (defaults to <data-dir>/grid.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for config and logs (defaults to ~/.conduit)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the bundled example config and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config
    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(min) = self.min_column_width {
            config.grid.min_column_width = min;
        }
        if let Some(max) = self.max_columns {
            config.grid.max_columns = max;
        }
        if let Some(name) = &self.theme {
            let theme = ThemeTokens::by_name(name).with_context(|| {
                format!(
                    "unknown theme '{}' (expected one of: {})",
                    name,
                    ThemeTokens::builtin_names().join(", ")
                )
            })?;
            config = config.with_theme(theme);
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", EXAMPLE_CONFIG);
        return Ok(());
    }

    util::init_data_dir(args.data_dir.clone());

    // Initialize logging to file (~/.conduit/logs/conduit-grid.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => Config::read_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    let config = args.apply(config)?;

    install_panic_hook();

    let mut app = App::new(config, args.agents);
    app.run().await
}
