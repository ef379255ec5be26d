pub mod edit;
pub mod forecast;
pub mod table;
