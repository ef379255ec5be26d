//! Error taxonomy for clipboard import and edit sessions.

use thiserror::Error;

/// Failure of a single field validator against one cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("required value is missing")]
    MissingField,

    #[error("'{raw}' is not a date in DD.MM.YYYY format")]
    MalformedDate { raw: String },

    #[error("'{raw}' is not a number")]
    MalformedNumber { raw: String },
}

/// The first offending cell of a rejected import.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {}, column {}: {}", .row + 1, .column + 1, .error)]
pub struct ValidationFailure {
    pub row: usize,
    pub column: usize,
    pub error: FieldError,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("clipboard is empty")]
    EmptyInput,

    #[error("clipboard access denied: {reason}")]
    ClipboardDenied { reason: String },

    #[error("clipboard unavailable: {reason}")]
    ClipboardUnavailable { reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl ImportError {
    /// Text shown to the operator. Permission problems get their own
    /// remediation hint since retrying the paste will not help.
    pub fn user_message(&self) -> String {
        match self {
            ImportError::EmptyInput => "Nothing to paste: the clipboard is empty.".to_string(),
            ImportError::ClipboardDenied { reason } => format!(
                "Clipboard access was denied ({reason}). Allow clipboard access for this application and try again."
            ),
            ImportError::ClipboardUnavailable { reason } => format!(
                "Could not read the clipboard ({reason}). Copy the cells again and retry the paste."
            ),
            ImportError::Validation(failure) => {
                format!("Pasted data was rejected, {failure}. The table has been cleared.")
            }
        }
    }
}

/// Protocol misuse or a failed import on an [`EditSession`].
///
/// [`EditSession`]: crate::usecase::services::edit_session::EditSession
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("edit session is not open")]
    NotOpen,

    #[error("a clipboard read is already in progress")]
    ImportPending,

    #[error("clipboard read belongs to an earlier edit session")]
    StaleImport,

    #[error("row {row} is out of range ({len} rows staged)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("column {column} is out of range (table has {width} columns)")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error(transparent)]
    Import(#[from] ImportError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("model index {index} is out of range ({len} models)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no model is staged for deletion")]
    NothingToDelete,
}
