//! lnviz - Terminal dashboard for the lnprototest Lightning protocol harness
//!
//! Binary entry point: parses the command line, loads configuration and runs
//! either the TUI or the headless JSON-lines mode.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use lnviz_app::config::load_settings;
use lnviz_core::logging;
use lnviz_core::prelude::*;

/// lnviz - Lightning message flow dashboard
#[derive(Parser, Debug)]
#[command(name = "lnviz")]
#[command(about = "Terminal dashboard for the lnprototest Lightning protocol harness", long_about = None)]
struct Args {
    /// Harness backend base URL (overrides `server.base_url`)
    #[arg(long, value_name = "BASE_URL")]
    url: Option<String>,

    /// Node id sent with the connect request (overrides `server.node_id`)
    #[arg(long, value_name = "ID")]
    node_id: Option<String>,

    /// Config file path (default: <config dir>/lnviz/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run in headless mode (JSON lines on stdout, no TUI)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Log to file; the TUI owns the terminal and headless mode owns stdout
    logging::init()?;

    let settings = load_settings(args.config.as_deref()).with_overrides(args.url, args.node_id);
    info!(
        "Backend {} node {} (headless: {})",
        settings.server.base_url, settings.server.node_id, args.headless
    );

    let result = if args.headless {
        headless::runner::run_headless(settings).await
    } else {
        lnviz_tui::run(settings).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("lnviz exiting");
    result
}
