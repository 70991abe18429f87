// Adapters layer: concrete implementations for external systems (files, spreadsheets, database).

pub mod memory;
pub mod mongo;
pub mod spreadsheet;
pub mod storage;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use storage::LocalStorage;
