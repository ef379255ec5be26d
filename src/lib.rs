//! Clipboard-to-table import and transactional editing for forecast input
//! tables.
//!
//! Pasted spreadsheet text goes through [`infra::import::grid::parse_grid`],
//! is typed column by column with [`infra::import::pipeline`], and lands in
//! an [`usecase::services::edit_session::EditSession`] staging copy until
//! committed.

pub mod config;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod usecase;
