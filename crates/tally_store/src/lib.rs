pub mod models;
pub mod operations;

pub use models::{StoreError, StoreResult, record_from_json};
pub use operations::{DEFAULT_OUTPUT, read_record, write_record};
