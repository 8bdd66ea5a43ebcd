//! # StockWise Dashboard Library
//!
//! Composition root for the terminal dashboard: configuration, logging,
//! the data layer and the command loop.
//!
//! ## Module Organization
//! ```text
//! stockwise_dashboard/
//! ├── lib.rs          ◄─── You are here (setup & run loop)
//! ├── cli.rs          ◄─── Command-line arguments
//! ├── error.rs        ◄─── AppError for commands
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   ├── view.rs     ◄─── ActiveView
//! │   └── app.rs      ◄─── App (view lifecycle, focus SKU, notices)
//! ├── commands/       ◄─── Line parsing + handlers per area
//! └── views/          ◄─── Text rendering per view
//! ```
//!
//! ## One Turn of the Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  render(view) ──► prompt ──► read line ──► parse ──► execute            │
//! │       ▲                                                 │               │
//! │       └──────────── notice (one-shot) ◄─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;

use anyhow::Context;
use stockwise_client::{ClientConfig, StockWiseClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Invocation, Options};
use state::{ActiveView, App};

/// Runs the dashboard.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Dashboard Startup                                 │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • --help / --version exit early                                     │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,stockwise=debug; override with RUST_LOG             │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config path or platform config dir (client.toml)               │
/// │     • STOCKWISE_* environment overrides, then validation               │
/// │                                                                         │
/// │  4. Build Data Layer ─────────────────────────────────────────────────► │
/// │     • HttpBackend (reqwest) + resources + mutations                     │
/// │                                                                         │
/// │  5. Mount Initial View & Loop ────────────────────────────────────────► │
/// │     • One fetch per mounted resource                                    │
/// │     • Read commands from stdin until quit or EOF                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let options = match cli::parse(args) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            cli::print_usage();
            return Ok(());
        }
        Ok(Invocation::Version) => {
            println!("stockwise-dashboard {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(err) => {
            cli::print_usage();
            anyhow::bail!(err);
        }
    };

    init_tracing();
    info!("Starting StockWise dashboard");

    let config = ClientConfig::load(options.config.clone()).context("loading client config")?;
    info!(api = %config.api.base_url, "Configuration loaded");

    let view = initial_view(&options, &config);
    let client = StockWiseClient::connect(&config).context("building API client")?;

    let mut app = App::new(client, config, view);
    app.start().await;

    command_loop(&mut app).await?;

    info!("Dashboard closed");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockwise_client=trace` - Trace the data layer only
/// - Default: INFO, DEBUG for stockwise crates
///
/// Logs go to stderr so they never interleave with rendered views.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockwise=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--view` wins over `dashboard.initial_view`; an unknown name falls back
/// to the dashboard.
fn initial_view(options: &Options, config: &ClientConfig) -> ActiveView {
    let name = options
        .view
        .as_deref()
        .unwrap_or(&config.dashboard.initial_view);

    name.parse().unwrap_or_else(|err| {
        warn!(view = name, %err, "Unknown initial view, showing dashboard");
        ActiveView::default()
    })
}

async fn command_loop(app: &mut App) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while app.is_running() {
        let mut screen = views::render(app);
        if let Some(notice) = app.take_notice() {
            screen.push('\n');
            screen.push_str(&views::render_notice(&notice));
            screen.push('\n');
        }
        screen.push_str("\n> ");
        stdout.write_all(screen.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse(&line) {
            Ok(Some(command)) => commands::execute(app, command).await,
            Ok(None) => {}
            Err(err) => app.notify(err),
        }
    }

    app.quit();
    Ok(())
}
