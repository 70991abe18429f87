pub mod etl;
pub mod lookup;
pub mod seed;

pub use crate::domain::model::{DirectoryDataset, ImportSummary, SeedReport, SheetRow};
pub use crate::domain::ports::{DirectoryReader, DirectoryWriter, Pipeline, Storage};
pub use crate::utils::error::Result;
