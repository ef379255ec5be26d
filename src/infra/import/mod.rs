pub mod fields;
pub mod grid;
pub mod pipeline;
