use crate::domain::model::{City, Province, Sauna, SaunaRecord};
use crate::domain::ports::{CollectionName, DirectoryReader, DirectoryWriter};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Default)]
struct Collections {
    provinces: Option<Vec<Province>>,
    cities: Option<Vec<City>>,
    saunas: Option<Vec<SaunaRecord>>,
}

/// In-process directory store with the same unique keys as the database
/// indexes. Backs `--dry-run` seeding and tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: CollectionName) -> usize {
        let collections = self.collections.lock().await;
        match collection {
            CollectionName::Provinces => collections.provinces.as_ref().map_or(0, Vec::len),
            CollectionName::Cities => collections.cities.as_ref().map_or(0, Vec::len),
            CollectionName::Saunas => collections.saunas.as_ref().map_or(0, Vec::len),
        }
    }
}

fn duplicate(collection: CollectionName, key: impl Into<String>) -> DirectoryError {
    DirectoryError::DuplicateKeyError {
        collection: collection.to_string(),
        key: key.into(),
    }
}

fn sorted_by_name<T: Clone>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| name(a).cmp(name(b)));
    sorted
}

#[async_trait]
impl DirectoryWriter for MemoryStore {
    async fn drop_collection(&self, collection: CollectionName) -> Result<bool> {
        let mut collections = self.collections.lock().await;
        let existed = match collection {
            CollectionName::Provinces => collections.provinces.take().is_some(),
            CollectionName::Cities => collections.cities.take().is_some(),
            CollectionName::Saunas => collections.saunas.take().is_some(),
        };
        Ok(existed)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        let mut collections = self.collections.lock().await;
        collections.provinces.get_or_insert_with(Vec::new);
        collections.cities.get_or_insert_with(Vec::new);
        collections.saunas.get_or_insert_with(Vec::new);
        Ok(())
    }

    async fn insert_provinces(&self, provinces: &[Province]) -> Result<usize> {
        let mut collections = self.collections.lock().await;
        let stored = collections.provinces.get_or_insert_with(Vec::new);

        // 與 insertMany 的有序插入一致：遇到重複即停止，先前的資料保留
        let mut slugs: HashSet<String> = stored.iter().map(|p| p.slug.clone()).collect();
        for province in provinces {
            if !slugs.insert(province.slug.clone()) {
                return Err(duplicate(CollectionName::Provinces, province.slug.as_str()));
            }
            stored.push(province.clone());
        }
        Ok(provinces.len())
    }

    async fn insert_city(&self, city: &City) -> Result<()> {
        let mut collections = self.collections.lock().await;
        let stored = collections.cities.get_or_insert_with(Vec::new);
        if stored.iter().any(|c| c.slug == city.slug) {
            return Err(duplicate(CollectionName::Cities, city.slug.as_str()));
        }
        stored.push(city.clone());
        Ok(())
    }

    async fn insert_sauna(&self, id: ObjectId, sauna: &Sauna) -> Result<()> {
        let mut collections = self.collections.lock().await;
        let stored = collections.saunas.get_or_insert_with(Vec::new);
        if stored.iter().any(|r| r.id == id) {
            return Err(duplicate(CollectionName::Saunas, id.to_hex()));
        }
        if stored.iter().any(|r| r.sauna.identity() == sauna.identity()) {
            return Err(duplicate(
                CollectionName::Saunas,
                format!("{}/{}/{}", sauna.name, sauna.city, sauna.province),
            ));
        }
        stored.push(SaunaRecord {
            id,
            sauna: sauna.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl DirectoryReader for MemoryStore {
    async fn list_provinces(&self) -> Result<Vec<Province>> {
        let collections = self.collections.lock().await;
        let provinces = collections.provinces.as_deref().unwrap_or_default();
        Ok(sorted_by_name(provinces, |p| &p.name))
    }

    async fn find_province(&self, slug: &str) -> Result<Option<Province>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .provinces
            .iter()
            .flatten()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn find_cities_by_province(&self, province_slug: &str) -> Result<Vec<City>> {
        let collections = self.collections.lock().await;
        let cities: Vec<City> = collections
            .cities
            .iter()
            .flatten()
            .filter(|c| c.province_slug == province_slug)
            .cloned()
            .collect();
        Ok(sorted_by_name(&cities, |c| &c.name))
    }

    async fn find_city(&self, slug: &str) -> Result<Option<City>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .cities
            .iter()
            .flatten()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn find_saunas_by_city(&self, city_slug: &str) -> Result<Vec<SaunaRecord>> {
        let collections = self.collections.lock().await;
        let saunas: Vec<SaunaRecord> = collections
            .saunas
            .iter()
            .flatten()
            .filter(|r| r.sauna.city_slug == city_slug)
            .cloned()
            .collect();
        Ok(sorted_by_name(&saunas, |r| &r.sauna.name))
    }

    async fn find_sauna(&self, id: ObjectId) -> Result<Option<SaunaRecord>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .saunas
            .iter()
            .flatten()
            .find(|r| r.id == id)
            .cloned())
    }
}
