use crate::domain::entities::table::{NamedModel, TypedTable};

/// A value an edit session can stage: it must expose the validated rows it
/// carries so imports and manual edits can reach them.
pub trait StagedTable: Clone {
    fn table(&self) -> &TypedTable;
    fn table_mut(&mut self) -> &mut TypedTable;
}

impl StagedTable for TypedTable {
    fn table(&self) -> &TypedTable {
        self
    }

    fn table_mut(&mut self) -> &mut TypedTable {
        self
    }
}

impl StagedTable for NamedModel {
    fn table(&self) -> &TypedTable {
        &self.table
    }

    fn table_mut(&mut self) -> &mut TypedTable {
        &mut self.table
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<T> {
    Closed,
    Open { staging: T },
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        SessionState::Closed
    }
}

/// Change notifications pushed to whoever renders the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Opened,
    Imported { rows: usize },
    ImportRejected,
    Cleared,
    Edited,
    Committed,
    Discarded,
}
