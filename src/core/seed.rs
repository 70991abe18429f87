use crate::config::settings::SeedConfig;
use crate::domain::model::{City, Province, Sauna, SeedReport};
use crate::domain::ports::{CollectionName, DirectoryWriter, Storage};
use crate::domain::services::merge_duplicate_cities;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use crate::utils::validation::Validate;
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;

/// Replaces the directory collections with the JSON fixtures.
///
/// The run order is fixed: drop all three collections, create indexes, read
/// the fixtures, insert provinces as one batch, then cities and saunas one
/// record at a time. A failed city or sauna insert is logged and skipped;
/// anything else ends the run.
pub struct Seeder<S: Storage> {
    storage: S,
    config: SeedConfig,
    monitor: RunMonitor,
}

impl<S: Storage> Seeder<S> {
    pub fn new(storage: S, config: SeedConfig) -> Self {
        Self::new_with_monitoring(storage, config, false)
    }

    pub fn new_with_monitoring(storage: S, config: SeedConfig, monitor_enabled: bool) -> Self {
        Self {
            storage,
            config,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self, store: &dyn DirectoryWriter) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        self.drop_collections(store).await;
        store.ensure_indexes().await?;
        self.monitor.log_phase("Drop");

        let provinces: Vec<Province> = self.read_fixture(&self.config.provinces_path()).await?;
        let cities: Vec<City> = self.read_fixture(&self.config.cities_path()).await?;
        let saunas: Vec<Sauna> = self.read_fixture(&self.config.saunas_path()).await?;

        let city_rows = cities.len();
        let (cities, merged) = merge_duplicate_cities(cities);
        report.cities_merged = merged;
        tracing::info!(
            "Processed {} cities into {} unique cities",
            city_rows,
            cities.len()
        );

        // 省份整批寫入，失敗即中止
        for province in &provinces {
            province.validate()?;
        }
        report.provinces = store.insert_provinces(&provinces).await?;
        tracing::info!("Seeded {} provinces", report.provinces);

        // 城市與桑拿逐筆寫入，單筆錯誤記錄後略過
        report.cities_attempted = cities.len();
        for city in &cities {
            let result = match city.validate() {
                Ok(()) => store.insert_city(city).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => report.cities_seeded += 1,
                Err(e) => tracing::error!("Error seeding city {}: {}", city.name, e),
            }
        }
        tracing::info!(
            "Seeded {} cities out of {}",
            report.cities_seeded,
            report.cities_attempted
        );

        // 以 slug 後的鍵去重，"Banff" 與 "Banff " 視為同一筆
        report.saunas_attempted = saunas.len();
        let mut seen = HashSet::new();
        for sauna in &saunas {
            if !seen.insert(sauna.slug_identity()) {
                tracing::warn!(
                    "Skipping duplicate sauna {} in {}, {}",
                    sauna.name,
                    sauna.city_slug,
                    sauna.province_slug
                );
                continue;
            }
            let result = match sauna.validate() {
                Ok(()) => store.insert_sauna(ObjectId::new(), sauna).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => report.saunas_seeded += 1,
                Err(e) => tracing::error!("Error seeding sauna {}: {}", sauna.name, e),
            }
        }
        tracing::info!(
            "Seeded {} saunas out of {}",
            report.saunas_seeded,
            report.saunas_attempted
        );

        self.monitor.log_phase("Insert");
        self.monitor.log_final();
        Ok(report)
    }

    async fn drop_collections(&self, store: &dyn DirectoryWriter) {
        for collection in CollectionName::ALL {
            match store.drop_collection(collection).await {
                Ok(true) => tracing::debug!("Dropped {} collection", collection),
                Ok(false) => tracing::info!("No {} collection to drop", collection),
                Err(e) => tracing::warn!("Could not drop {} collection: {}", collection, e),
            }
        }
        tracing::info!("Dropped existing collections");
    }

    async fn read_fixture<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        tracing::debug!("Reading {}", path.display());
        let bytes = self.storage.read_file(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
