//! Filepath: src/infra/input.rs
//! Input acquisition: piped stdin when data is available, the system
//! clipboard otherwise. A read failure here is the one hard error the
//! pipeline surfaces.

use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use tracing::debug;

/// Fetch the raw tree sketch. `from_clipboard` skips the stdin check and goes
/// straight to the clipboard.
pub fn read_input(from_clipboard: bool) -> Result<String> {
    if !from_clipboard && !io::stdin().is_terminal() {
        debug!("reading tree sketch from piped stdin");
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading standard input")?;
        return Ok(buf);
    }

    debug!("reading tree sketch from clipboard");
    let mut clipboard = arboard::Clipboard::new().context("opening system clipboard")?;
    clipboard.get_text().context("reading clipboard text")
}
