pub mod types;
pub mod queries;
pub mod csv_store;

pub use types::*;
