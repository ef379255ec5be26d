use std::io::{IsTerminal, Read};

use crate::usecase::ports::clipboard::{ClipboardError, ClipboardSource};

/// Treats piped standard input as the clipboard. An interactive terminal
/// has nothing pasted, which is reported as an unavailable clipboard.
#[derive(Debug, Default)]
pub struct StdinClipboard;

impl ClipboardSource for StdinClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(ClipboardError::Unavailable(
                "no text piped on standard input".to_string(),
            ));
        }

        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        Ok(Some(text).filter(|text| !text.is_empty()))
    }
}
