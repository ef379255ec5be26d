use crate::domain::entities::table::{NamedModel, TypedTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Message(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RepoError {}

/// Storage for the bound values an edit session commits into.
pub trait TableRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn load_niz_table(&self) -> Result<TypedTable, RepoError>;
    fn save_niz_table(&self, table: &TypedTable) -> Result<(), RepoError>;

    fn load_referent_models(&self) -> Result<Vec<NamedModel>, RepoError>;
    fn save_referent_models(&self, models: &[NamedModel]) -> Result<(), RepoError>;
}
