pub mod edit_session;
pub mod model_registry;
pub mod table_service;
