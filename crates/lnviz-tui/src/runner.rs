//! Main TUI runner - entry point and event loop

use lnviz_app::config::Settings;
use lnviz_app::state::NoticeLevel;
use lnviz_app::Engine;
use lnviz_core::prelude::*;
use ratatui::DefaultTerminal;
use tracing::warn;

use crate::{clipboard, event, render, terminal};

/// Run the dashboard until the user quits or a signal arrives
pub async fn run(settings: Settings) -> Result<()> {
    let mut engine = Engine::new(settings)?;
    info!(
        "Starting dashboard for {} (node {})",
        engine.state.settings.server.base_url, engine.state.settings.server.node_id
    );

    let mut term = terminal::enter();
    let result = run_loop(&mut term, &mut engine);

    // Stop polls and close the push channel before handing the terminal back
    engine.shutdown().await;
    terminal::leave();

    result
}

/// Main event loop
fn run_loop(terminal: &mut DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Bridge callbacks, poll results and signals
        engine.drain_pending_messages();

        flush_clipboard(engine);

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}

/// Hand a pending copy request to the terminal
fn flush_clipboard(engine: &mut Engine) {
    let Some(text) = engine.state.clipboard_request.take() else {
        return;
    };
    if let Err(e) = clipboard::copy(&text) {
        warn!("Clipboard copy failed: {}", e);
        engine
            .state
            .notify(format!("Copy failed: {e}"), NoticeLevel::Error);
    }
}
