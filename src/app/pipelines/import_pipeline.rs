use crate::adapters::spreadsheet;
use crate::config::settings::{ImportConfig, CITIES_FILE, PROVINCES_FILE, SAUNAS_FILE};
use crate::domain::model::{DirectoryDataset, ImportSummary, Sauna, SheetRow};
use crate::domain::ports::{Pipeline, Storage};
use crate::domain::services::{build_hierarchy, filter_valid_rows, row_to_sauna};
use crate::utils::error::{DirectoryError, Result};
use serde::Serialize;
use std::path::Path;

/// Spreadsheet → provinces/cities/saunas JSON.
pub struct ImportPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: ImportConfig,
}

impl<S: Storage> ImportPipeline<S> {
    pub fn new(storage: S, config: ImportConfig) -> Self {
        Self { storage, config }
    }

    async fn write_json<T: Serialize + Sync>(&self, file_name: &str, items: &[T]) -> Result<()> {
        let path = self.config.output_dir.join(file_name);
        let json = serde_json::to_string_pretty(items)?;
        tracing::debug!("Writing {} ({} bytes)", path.display(), json.len());
        self.storage.write_file(&path, json.as_bytes()).await
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ImportPipeline<S> {
    async fn extract(&self) -> Result<Vec<SheetRow>> {
        let input: &Path = &self.config.input;
        tracing::info!("Looking for spreadsheet at: {}", input.display());

        if !self.storage.exists(input).await {
            return Err(DirectoryError::InputNotFoundError {
                path: input.display().to_string(),
            });
        }

        let bytes = self.storage.read_file(input).await?;
        spreadsheet::read_rows(input, bytes, self.config.sheet.as_deref())
    }

    async fn transform(&self, rows: Vec<SheetRow>) -> Result<DirectoryDataset> {
        let rows_read = rows.len();
        let (valid_rows, rows_dropped) = filter_valid_rows(rows);

        if rows_dropped > 0 {
            tracing::warn!(
                "Filtered out {} rows with missing required data (name, city, province, country)",
                rows_dropped
            );
        }

        let saunas: Vec<Sauna> = valid_rows.iter().map(row_to_sauna).collect();
        let (provinces, cities) = build_hierarchy(&saunas);

        tracing::info!(
            "Found {} unique provinces: {}",
            provinces.len(),
            provinces
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(DirectoryDataset {
            provinces,
            cities,
            saunas,
            rows_read,
            rows_dropped,
        })
    }

    async fn load(&self, dataset: DirectoryDataset) -> Result<ImportSummary> {
        self.write_json(PROVINCES_FILE, &dataset.provinces).await?;
        self.write_json(CITIES_FILE, &dataset.cities).await?;
        self.write_json(SAUNAS_FILE, &dataset.saunas).await?;

        let output_dir = self.config.output_dir.display().to_string();
        tracing::info!("Successfully wrote JSON files to {}:", output_dir);
        tracing::info!("- {} ({} provinces)", PROVINCES_FILE, dataset.provinces.len());
        tracing::info!("- {} ({} cities)", CITIES_FILE, dataset.cities.len());
        tracing::info!("- {} ({} saunas)", SAUNAS_FILE, dataset.saunas.len());

        Ok(ImportSummary {
            output_dir,
            provinces: dataset.provinces.len(),
            cities: dataset.cities.len(),
            saunas: dataset.saunas.len(),
            rows_dropped: dataset.rows_dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, data: &str) {
            self.files
                .lock()
                .await
                .insert(PathBuf::from(path), data.as_bytes().to_vec());
        }

        async fn get_json(&self, path: &str) -> serde_json::Value {
            let files = self.files.lock().await;
            serde_json::from_slice(files.get(Path::new(path)).unwrap()).unwrap()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DirectoryError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().await.contains_key(path)
        }
    }

    fn config() -> ImportConfig {
        ImportConfig {
            input: PathBuf::from("in/saunas.csv"),
            sheet: None,
            output_dir: PathBuf::from("out"),
        }
    }

    #[tokio::test]
    async fn test_missing_input_aborts_extract() {
        let pipeline = ImportPipeline::new(MockStorage::default(), config());
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, DirectoryError::InputNotFoundError { .. }));
    }

    #[tokio::test]
    async fn test_pipeline_writes_three_collections() {
        let storage = MockStorage::default();
        storage
            .put(
                "in/saunas.csv",
                "name,city,province,country,rating\n\
                 Nordic Sauna,Banff ,Alberta,Canada,4.8\n\
                 Missing Country,Banff,Alberta,\n",
            )
            .await;

        let pipeline = ImportPipeline::new(storage.clone(), config());
        let rows = pipeline.extract().await.unwrap();
        let dataset = pipeline.transform(rows).await.unwrap();
        assert_eq!(dataset.rows_read, 2);
        assert_eq!(dataset.rows_dropped, 1);

        let summary = pipeline.load(dataset).await.unwrap();
        assert_eq!(summary.saunas, 1);

        let saunas = storage.get_json("out/saunas.json").await;
        assert_eq!(saunas[0]["citySlug"], "banff");
        assert_eq!(saunas[0]["provinceSlug"], "alberta");
        assert_eq!(saunas[0]["rating"], 4.8);

        let provinces = storage.get_json("out/provinces.json").await;
        assert_eq!(provinces[0]["cityCount"], 1);
        assert_eq!(provinces[0]["saunaCount"], 1);
    }
}
