mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Database, Logger, Settings};
pub use storage::Storage;
