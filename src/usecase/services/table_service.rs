use std::sync::Arc;

use crate::domain::entities::table::{NamedModel, TypedTable};
use crate::usecase::ports::repo::{RepoError, TableRepository};

pub struct TableService {
    repo: Arc<dyn TableRepository>,
}

impl TableService {
    pub fn new(repo: Arc<dyn TableRepository>) -> Self {
        Self { repo }
    }

    pub fn init(&self) -> Result<(), RepoError> {
        self.repo.init()
    }

    pub fn niz_table(&self) -> Result<TypedTable, RepoError> {
        self.repo.load_niz_table()
    }

    pub fn save_niz_table(&self, table: &TypedTable) -> Result<(), RepoError> {
        self.repo.save_niz_table(table)
    }

    pub fn referent_models(&self) -> Result<Vec<NamedModel>, RepoError> {
        self.repo.load_referent_models()
    }

    pub fn save_referent_models(&self, models: &[NamedModel]) -> Result<(), RepoError> {
        self.repo.save_referent_models(models)
    }
}
