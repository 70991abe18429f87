use crate::domain::model::{DirectoryDataset, ImportSummary};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ImportSummary> {
        tracing::info!("Starting import...");
        let dataset = self.extract_and_transform().await?;

        // Load
        tracing::info!("Writing JSON files...");
        let summary = self.pipeline.load(dataset).await?;
        self.monitor.log_phase("Load");
        self.monitor.log_final();

        Ok(summary)
    }

    /// Extract and transform without writing anything.
    pub async fn preview(&self) -> Result<DirectoryDataset> {
        let dataset = self.extract_and_transform().await?;
        self.monitor.log_final();
        Ok(dataset)
    }

    async fn extract_and_transform(&self) -> Result<DirectoryDataset> {
        // Extract
        let rows = self.pipeline.extract().await?;
        tracing::info!("Loaded {} rows", rows.len());
        self.monitor.log_phase("Extract");

        // Transform
        let dataset = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Transformed into {} provinces, {} cities, {} saunas",
            dataset.provinces.len(),
            dataset.cities.len(),
            dataset.saunas.len()
        );
        self.monitor.log_phase("Transform");

        Ok(dataset)
    }
}
