pub mod queries;
pub mod registry;
