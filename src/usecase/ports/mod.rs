pub mod clipboard;
pub mod repo;
