use std::path::PathBuf;

use crate::domain::entities::table::{NamedModel, TableKind, TypedTable};
use crate::infra::sqlite::queries::{load_tables, replace_tables};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{RepoError, TableRepository};

const NIZ_TABLE_NAME: &str = "niz";

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl TableRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn load_niz_table(&self) -> Result<TypedTable, RepoError> {
        let tables = load_tables(&self.db_path, TableKind::Niz)
            .map_err(|err| RepoError::Message(format!("{err:#}")))?;
        Ok(tables
            .into_iter()
            .next()
            .map(|model| model.table)
            .unwrap_or_default())
    }

    fn save_niz_table(&self, table: &TypedTable) -> Result<(), RepoError> {
        replace_tables(&self.db_path, TableKind::Niz, &[(NIZ_TABLE_NAME, table)])
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn load_referent_models(&self) -> Result<Vec<NamedModel>, RepoError> {
        load_tables(&self.db_path, TableKind::Referent)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn save_referent_models(&self, models: &[NamedModel]) -> Result<(), RepoError> {
        let tables: Vec<(&str, &TypedTable)> = models
            .iter()
            .map(|model| (model.name.as_str(), &model.table))
            .collect();
        replace_tables(&self.db_path, TableKind::Referent, &tables)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }
}
