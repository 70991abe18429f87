pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, MemoryStore, MongoStore};
pub use app::pipelines::ImportPipeline;
pub use config::{DatabaseSettings, FileConfig, ImportConfig, SeedConfig};
pub use crate::core::{etl::EtlEngine, lookup::DirectoryLookup, seed::Seeder};
pub use utils::error::{DirectoryError, Result};
