use crate::core::{Pipeline, TransformSummary};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting icon pipeline...");

        // Extract
        tracing::info!("Loading symbols...");
        let symbols = self.pipeline.extract().await?;
        tracing::info!("Loaded {} symbols", symbols.len());

        // Transform
        tracing::info!("Processing SVGs...");
        let summary = self.pipeline.transform(symbols).await?;
        tracing::info!("Processed {} symbols", summary.total());

        // Load
        tracing::info!("Packing icons...");
        let output_path = self.pipeline.load(summary).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }

    /// 只打包已處理的目錄，不讀取符號清單
    pub async fn pack_only(&self) -> Result<String> {
        tracing::info!("Packing icons...");
        let output_path = self.pipeline.load(TransformSummary::default()).await?;
        tracing::info!("Output saved to: {}", output_path);
        Ok(output_path)
    }
}
