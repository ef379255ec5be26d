use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Host clipboard. `Ok(None)` means the clipboard holds no text.
pub trait ClipboardSource {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;
}

/// Clipboard backed by a fixed value, for hosts that hand over pasted text
/// directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<Result<String, ClipboardError>>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(Ok(text.into())),
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            content: Some(Err(ClipboardError::PermissionDenied(reason.into()))),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            content: Some(Err(ClipboardError::Unavailable(reason.into()))),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Some(Ok(text.into()));
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        self.content.clone().transpose()
    }
}
