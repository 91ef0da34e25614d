//! Clipboard access through the OSC 52 terminal escape.
//!
//! Works over SSH and inside tmux (with `set-clipboard on`) because the
//! terminal emulator, not this process, owns the clipboard.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crossterm::{execute, style::Print};

use lnviz_core::prelude::*;

/// `ESC ] 52 ; c ; <base64> ST`
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Write the escape for `text` to the given writer
pub fn write_to<W: Write>(out: &mut W, text: &str) -> Result<()> {
    execute!(out, Print(osc52_sequence(text)))?;
    Ok(())
}

/// Ask the terminal to place `text` on the system clipboard
pub fn copy(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    write_to(&mut stdout, text)?;
    debug!("Copied {} bytes via OSC 52", text.len());
    Ok(())
}
