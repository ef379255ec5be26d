//! Transactional staging over a bound table.
//!
//! `open` copies the bound value, every mutation lands on the copy, and
//! `commit` replaces the bound value wholesale. `discard` drops the copy.
//! Staging only ever holds rows that passed validation, so commit does not
//! validate again.

use tracing::{debug, info, warn};

use crate::domain::entities::edit::{SessionEvent, SessionState, StagedTable};
use crate::domain::entities::table::{
    FieldValidator, NamedModel, NumberFormat, TableKind, TypedRow, TypedTable,
};
use crate::domain::error::{ImportError, SessionError, ValidationFailure};
use crate::infra::import::grid::parse_grid;
use crate::infra::import::pipeline::{import_rows, validate_row};
use crate::usecase::ports::clipboard::{ClipboardError, ClipboardSource};

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Handle for an in-flight clipboard read, redeemed with
/// [`EditSession::finish_import`].
#[derive(Debug)]
#[must_use]
pub struct ImportTicket {
    generation: u64,
}

pub struct EditSession<T: StagedTable> {
    validators: Vec<FieldValidator>,
    state: SessionState<T>,
    last_error: Option<ImportError>,
    generation: u64,
    pending: Option<u64>,
    version: u64,
    listener: Option<Listener>,
}

impl EditSession<TypedTable> {
    pub fn for_kind(kind: TableKind, format: NumberFormat) -> Self {
        Self::new(kind.validators(format))
    }
}

impl EditSession<NamedModel> {
    pub fn for_curves(format: NumberFormat) -> Self {
        Self::new(TableKind::Referent.validators(format))
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        self.staging_mut()?.name = name.into();
        self.notify(SessionEvent::Edited);
        Ok(())
    }
}

impl<T: StagedTable> EditSession<T> {
    pub fn new(validators: Vec<FieldValidator>) -> Self {
        Self {
            validators,
            state: SessionState::Closed,
            last_error: None,
            generation: 0,
            pending: None,
            version: 0,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn validators(&self) -> &[FieldValidator] {
        &self.validators
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    pub fn staging(&self) -> Option<&T> {
        match &self.state {
            SessionState::Open { staging } => Some(staging),
            SessionState::Closed => None,
        }
    }

    pub fn last_error(&self) -> Option<&ImportError> {
        self.last_error.as_ref()
    }

    pub fn is_import_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bumped on every transition and staging change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Opening an open session starts over from `bound`; unsaved edits are lost.
    pub fn open(&mut self, bound: &T) {
        if self.is_open() {
            warn!("edit session reopened, discarding unsaved edits");
        }
        self.generation += 1;
        self.pending = None;
        self.last_error = None;
        self.state = SessionState::Open {
            staging: bound.clone(),
        };
        debug!(rows = bound.table().len(), "edit session opened");
        self.notify(SessionEvent::Opened);
    }

    pub fn begin_import(&mut self) -> Result<ImportTicket, SessionError> {
        if !self.is_open() {
            return Err(SessionError::NotOpen);
        }
        if self.pending.is_some() {
            return Err(SessionError::ImportPending);
        }
        self.pending = Some(self.generation);
        Ok(ImportTicket {
            generation: self.generation,
        })
    }

    /// Completes a clipboard read. A validation failure empties staging;
    /// clipboard and empty-input failures leave it as it was.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        read: Result<Option<String>, ClipboardError>,
    ) -> Result<usize, SessionError> {
        if !self.is_open() || self.pending != Some(ticket.generation) {
            warn!(ticket = ticket.generation, "dropping clipboard read from a closed edit session");
            return Err(SessionError::StaleImport);
        }
        self.pending = None;

        let text = match read {
            Ok(text) => text.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "clipboard read failed");
                let import_err = match err {
                    ClipboardError::PermissionDenied(reason) => {
                        ImportError::ClipboardDenied { reason }
                    }
                    ClipboardError::Unavailable(reason) => {
                        ImportError::ClipboardUnavailable { reason }
                    }
                };
                return Err(self.reject(import_err));
            }
        };

        let grid = match parse_grid(&text) {
            Ok(grid) => grid,
            Err(err) => return Err(self.reject(err)),
        };

        let SessionState::Open { staging } = &mut self.state else {
            return Err(SessionError::NotOpen);
        };
        match import_rows(staging.table_mut(), &grid, &self.validators) {
            Ok(count) => {
                info!(rows = count, "clipboard rows imported");
                self.last_error = None;
                self.notify(SessionEvent::Imported { rows: count });
                Ok(count)
            }
            Err(failure) => {
                warn!(%failure, "clipboard import rejected, staging cleared");
                Err(self.reject(failure.into()))
            }
        }
    }

    pub fn import_from_clipboard(
        &mut self,
        clipboard: &mut dyn ClipboardSource,
    ) -> Result<usize, SessionError> {
        let ticket = self.begin_import()?;
        let read = clipboard.read_text();
        self.finish_import(ticket, read)
    }

    pub fn manual_clear(&mut self) -> Result<(), SessionError> {
        self.staging_mut()?.table_mut().rows.clear();
        self.notify(SessionEvent::Cleared);
        Ok(())
    }

    /// Replaces one cell after validating `raw` with that column's validator.
    pub fn edit_cell(&mut self, row: usize, column: usize, raw: &str) -> Result<(), SessionError> {
        if !self.is_open() {
            return Err(SessionError::NotOpen);
        }
        let validator = *self
            .validators
            .get(column)
            .ok_or(SessionError::ColumnOutOfRange {
                column,
                width: self.validators.len(),
            })?;
        let table = self.staging_mut()?.table_mut();
        let len = table.len();
        let target = table
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or(SessionError::RowOutOfRange { row, len })?;

        *target = validator.validate(raw).map_err(|error| {
            ImportError::from(ValidationFailure { row, column, error })
        })?;
        self.notify(SessionEvent::Edited);
        Ok(())
    }

    pub fn push_row(&mut self, cells: &[&str]) -> Result<(), SessionError> {
        let row_idx = self.staging().ok_or(SessionError::NotOpen)?.table().len();
        let row = validate_row(row_idx, cells, &self.validators).map_err(ImportError::from)?;
        self.staging_mut()?.table_mut().rows.push(row);
        self.notify(SessionEvent::Edited);
        Ok(())
    }

    pub fn remove_row(&mut self, row: usize) -> Result<TypedRow, SessionError> {
        let table = self.staging_mut()?.table_mut();
        if row >= table.len() {
            return Err(SessionError::RowOutOfRange {
                row,
                len: table.len(),
            });
        }
        let removed = table.rows.remove(row);
        self.notify(SessionEvent::Edited);
        Ok(removed)
    }

    pub fn commit(&mut self, bound: &mut T) -> Result<(), SessionError> {
        let staging = self.close()?;
        info!(rows = staging.table().len(), "edit session committed");
        *bound = staging;
        self.notify(SessionEvent::Committed);
        Ok(())
    }

    pub fn discard(&mut self) -> Result<(), SessionError> {
        self.close()?;
        debug!("edit session discarded");
        self.notify(SessionEvent::Discarded);
        Ok(())
    }

    fn close(&mut self) -> Result<T, SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Open { staging } => {
                self.pending = None;
                Ok(staging)
            }
            SessionState::Closed => Err(SessionError::NotOpen),
        }
    }

    fn staging_mut(&mut self) -> Result<&mut T, SessionError> {
        match &mut self.state {
            SessionState::Open { staging } => Ok(staging),
            SessionState::Closed => Err(SessionError::NotOpen),
        }
    }

    fn reject(&mut self, err: ImportError) -> SessionError {
        self.last_error = Some(err.clone());
        self.notify(SessionEvent::ImportRejected);
        err.into()
    }

    fn notify(&mut self, event: SessionEvent) {
        self.version += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}
