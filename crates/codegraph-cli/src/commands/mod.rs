pub mod clean;
pub mod index;
pub mod param_types;
pub mod query;
pub mod serve;
