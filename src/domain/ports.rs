use crate::domain::model::{City, DirectoryDataset, ImportSummary, Province, Sauna, SaunaRecord, SheetRow};
use crate::utils::error::Result;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SheetRow>>;
    async fn transform(&self, rows: Vec<SheetRow>) -> Result<DirectoryDataset>;
    async fn load(&self, dataset: DirectoryDataset) -> Result<ImportSummary>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Provinces,
    Cities,
    Saunas,
}

impl CollectionName {
    pub const ALL: [CollectionName; 3] = [Self::Saunas, Self::Cities, Self::Provinces];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provinces => "provinces",
            Self::Cities => "cities",
            Self::Saunas => "saunas",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write side of the directory database, used by seed runs.
#[async_trait]
pub trait DirectoryWriter: Send + Sync {
    /// Drops a collection. `Ok(false)` means it did not exist.
    async fn drop_collection(&self, collection: CollectionName) -> Result<bool>;
    async fn ensure_indexes(&self) -> Result<()>;
    async fn insert_provinces(&self, provinces: &[Province]) -> Result<usize>;
    async fn insert_city(&self, city: &City) -> Result<()>;
    async fn insert_sauna(&self, id: ObjectId, sauna: &Sauna) -> Result<()>;
}

/// Read side, backing the lookup queries the directory pages use.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    async fn list_provinces(&self) -> Result<Vec<Province>>;
    async fn find_province(&self, slug: &str) -> Result<Option<Province>>;
    async fn find_cities_by_province(&self, province_slug: &str) -> Result<Vec<City>>;
    async fn find_city(&self, slug: &str) -> Result<Option<City>>;
    async fn find_saunas_by_city(&self, city_slug: &str) -> Result<Vec<SaunaRecord>>;
    async fn find_sauna(&self, id: ObjectId) -> Result<Option<SaunaRecord>>;
}
