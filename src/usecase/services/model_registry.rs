use tracing::{debug, info, warn};

use crate::domain::entities::table::{NamedModel, NumberFormat};
use crate::domain::error::RegistryError;
use crate::usecase::services::edit_session::EditSession;

/// Referent curves, edited one at a time through a shared edit session.
/// Models are addressed by position; deletion shifts later indices down.
pub struct NamedModelRegistry {
    models: Vec<NamedModel>,
    session: EditSession<NamedModel>,
    editing: Option<usize>,
    pending_delete: Option<usize>,
}

impl NamedModelRegistry {
    pub fn new(models: Vec<NamedModel>, format: NumberFormat) -> Self {
        Self {
            models,
            session: EditSession::for_curves(format),
            editing: None,
            pending_delete: None,
        }
    }

    pub fn models(&self) -> &[NamedModel] {
        &self.models
    }

    pub fn into_models(self) -> Vec<NamedModel> {
        self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn session(&self) -> &EditSession<NamedModel> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession<NamedModel> {
        &mut self.session
    }

    /// Index of the model being edited; `None` while creating a new one.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    /// Opens the editor on the model at `index`. A missing or out-of-range
    /// index opens a blank model to be appended on save.
    pub fn select_for_edit(&mut self, index: Option<usize>) {
        self.editing = index.filter(|&idx| idx < self.models.len());
        match self.editing {
            Some(idx) => {
                debug!(index = idx, name = %self.models[idx].name, "editing referent model");
                self.session.open(&self.models[idx]);
            }
            None => {
                debug!("creating referent model");
                self.session.open(&NamedModel::default());
            }
        }
    }

    /// Commits the open session. Returns the index the model was stored at.
    pub fn save(&mut self) -> Result<usize, RegistryError> {
        let target = self.editing.take().filter(|&idx| idx < self.models.len());
        let index = match target {
            Some(idx) => {
                self.session.commit(&mut self.models[idx])?;
                idx
            }
            None => {
                let mut model = NamedModel::default();
                self.session.commit(&mut model)?;
                self.models.push(model);
                self.models.len() - 1
            }
        };
        info!(index, name = %self.models[index].name, "referent model saved");
        Ok(index)
    }

    pub fn cancel_edit(&mut self) -> Result<(), RegistryError> {
        self.editing = None;
        self.session.discard()?;
        Ok(())
    }

    /// Stages `index` for deletion and raises the confirmation prompt.
    /// Nothing is removed until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, index: usize) -> Result<(), RegistryError> {
        if index >= self.models.len() {
            self.pending_delete = None;
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.models.len(),
            });
        }
        self.pending_delete = Some(index);
        Ok(())
    }

    pub fn is_delete_prompt_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Result<NamedModel, RegistryError> {
        let index = self
            .pending_delete
            .take()
            .ok_or(RegistryError::NothingToDelete)?;
        if index >= self.models.len() {
            self.pending_delete = None;
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.models.len(),
            });
        }

        let removed = self.models.remove(index);
        self.editing = match self.editing {
            Some(editing) if editing == index => {
                warn!(index, "model under edit was deleted, saving will append it");
                None
            }
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };
        info!(index, name = %removed.name, "referent model deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{TypedTable, TypedValue};
    use crate::domain::error::SessionError;
    use crate::usecase::ports::clipboard::MemoryClipboard;

    fn curve(name: &str, values: &[f64]) -> NamedModel {
        NamedModel::new(
            name,
            TypedTable::from_rows(values.iter().map(|v| vec![TypedValue::Number(*v)]).collect()),
        )
    }

    fn registry() -> NamedModelRegistry {
        NamedModelRegistry::new(
            vec![curve("a", &[1.0]), curve("b", &[2.0]), curve("c", &[3.0])],
            NumberFormat::DecimalPoint,
        )
    }

    #[test]
    fn select_existing_seeds_session_from_model() {
        let mut registry = registry();
        registry.select_for_edit(Some(1));

        assert_eq!(registry.editing_index(), Some(1));
        assert_eq!(registry.session().staging(), Some(&curve("b", &[2.0])));
    }

    #[test]
    fn out_of_range_selection_creates_new_model() {
        let mut registry = registry();
        registry.select_for_edit(Some(7));

        assert_eq!(registry.editing_index(), None);
        assert_eq!(registry.session().staging(), Some(&NamedModel::default()));

        let mut clipboard = MemoryClipboard::with_text("4\n5");
        let session = registry.session_mut();
        session.rename("d").expect("rename should succeed");
        session
            .import_from_clipboard(&mut clipboard)
            .expect("import should succeed");
        let index = registry.save().expect("save should succeed");

        assert_eq!(index, 3);
        assert_eq!(registry.models()[3], curve("d", &[4.0, 5.0]));
    }

    #[test]
    fn save_overwrites_selected_model() {
        let mut registry = registry();
        registry.select_for_edit(Some(0));
        let mut clipboard = MemoryClipboard::with_text("9");
        registry
            .session_mut()
            .import_from_clipboard(&mut clipboard)
            .expect("import should succeed");

        let index = registry.save().expect("save should succeed");

        assert_eq!(index, 0);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.models()[0], curve("a", &[1.0, 9.0]));
    }

    #[test]
    fn cancel_leaves_models_untouched() {
        let mut registry = registry();
        registry.select_for_edit(Some(2));
        registry
            .session_mut()
            .manual_clear()
            .expect("clear should succeed");
        registry.cancel_edit().expect("cancel should succeed");

        assert_eq!(registry.models()[2], curve("c", &[3.0]));
        assert!(matches!(
            registry.save(),
            Err(RegistryError::Session(SessionError::NotOpen))
        ));
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut registry = registry();
        registry.request_delete(1).expect("index exists");

        assert!(registry.is_delete_prompt_open());
        assert_eq!(registry.len(), 3, "request alone removes nothing");

        let removed = registry.confirm_delete().expect("confirm should succeed");

        assert_eq!(removed.name, "b");
        assert!(!registry.is_delete_prompt_open());
        let names: Vec<&str> = registry.models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn cancelled_delete_removes_nothing() {
        let mut registry = registry();
        registry.request_delete(0).expect("index exists");
        registry.cancel_delete();

        assert_eq!(registry.confirm_delete(), Err(RegistryError::NothingToDelete));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn delete_request_out_of_range() {
        let mut registry = registry();
        assert_eq!(
            registry.request_delete(3),
            Err(RegistryError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(!registry.is_delete_prompt_open());
    }

    #[test]
    fn failed_delete_request_drops_earlier_request() {
        let mut registry = registry();
        registry.request_delete(0).expect("index exists");

        assert!(registry.request_delete(9).is_err());
        assert!(!registry.is_delete_prompt_open());
        assert_eq!(registry.confirm_delete(), Err(RegistryError::NothingToDelete));
        assert_eq!(registry.models().len(), 3);
    }

    #[test]
    fn deleting_earlier_model_shifts_edit_target() {
        let mut registry = registry();
        registry.select_for_edit(Some(2));
        registry.request_delete(0).expect("index exists");
        registry.confirm_delete().expect("confirm should succeed");

        assert_eq!(registry.editing_index(), Some(1));
        registry
            .session_mut()
            .rename("c2")
            .expect("rename should succeed");
        assert_eq!(registry.save(), Ok(1));
        assert_eq!(registry.models()[1].name, "c2");
    }
}
