//! Terminal setup and restoration

use ratatui::DefaultTerminal;

/// Enter the alternate screen in raw mode.
///
/// Installs a panic hook first so a crash inside the render loop still
/// leaves the user's shell usable.
pub fn enter() -> DefaultTerminal {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    ratatui::init()
}

/// Leave the alternate screen and restore cooked mode
pub fn leave() {
    ratatui::restore();
}
