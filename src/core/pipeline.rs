use crate::core::archive::{archive_path, unpack_svgs};
use crate::core::fetch::RawFetcher;
use crate::core::pack::pack_directory;
use crate::core::{ConfigProvider, Pipeline, Storage, Symbol, TransformSummary};
use crate::domain::model::parse_symbols;
use crate::svg::{Normalizer, Outcome};
use crate::utils::error::Result;

fn join(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

pub struct IconPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    normalizer: Normalizer,
}

impl<S: Storage, C: ConfigProvider> IconPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let normalizer = Normalizer::new(config.normalize_options());
        Self {
            storage,
            config,
            normalizer,
        }
    }

    /// 原始快取為空且 `{raw_dir}.tgz` 存在時，先從封存檔還原
    async fn restore_raw_cache(&self) -> Result<usize> {
        let raw_dir = self.config.raw_dir();
        let archive = archive_path(raw_dir);

        let cached = self.storage.list_files(raw_dir, "svg").await.unwrap_or_default();
        if !cached.is_empty() || !self.storage.exists(&archive).await {
            return Ok(0);
        }

        let data = self.storage.read_file(&archive).await?;
        let files = unpack_svgs(&data)?;
        for (name, content) in &files {
            self.storage.write_file(&join(raw_dir, name), content).await?;
        }

        tracing::info!("All SVGs extracted from {} to {}", archive, raw_dir);
        Ok(files.len())
    }

    /// 下載快取中缺少的原始 SVG；單一檔案失敗只記錄，不中斷批次
    async fn download_missing(&self, symbols: &[Symbol]) -> Result<usize> {
        let mut missing = Vec::new();
        for symbol in symbols {
            if !self.storage.exists(&join(self.config.raw_dir(), &symbol.svg_name())).await {
                missing.push(symbol);
            }
        }

        if missing.is_empty() {
            tracing::info!("All SVGs already downloaded.");
            return Ok(0);
        }

        let fetcher = RawFetcher::new(
            self.config.user_agent(),
            self.config.request_timeout_seconds(),
        )?;

        let mut downloaded = 0;
        for symbol in missing {
            match fetcher.fetch(symbol).await {
                Ok(data) => {
                    let path = join(self.config.raw_dir(), &symbol.svg_name());
                    self.storage.write_file(&path, &data).await?;
                    downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!("⚠️ Could not download {}: {}", symbol.svg_name(), e);
                }
            }
        }

        tracing::info!("Downloaded {} SVG files", downloaded);
        Ok(downloaded)
    }

    async fn process_symbol(&self, symbol: &Symbol, summary: &mut TransformSummary) -> Result<()> {
        let name = symbol.svg_name();
        let target = join(self.config.processed_dir(), &name);
        let source = join(self.config.raw_dir(), &name);

        if !self.config.force_process() && self.storage.exists(&target).await {
            summary.up_to_date += 1;
            return Ok(());
        }
        if !self.storage.exists(&source).await {
            tracing::debug!("Skipped {} as the SVG file is not downloaded.", name);
            summary.missing += 1;
            return Ok(());
        }

        let input = self.storage.read_file(&source).await?;
        // 格式錯誤的檔案以 EtlError::SvgError 回傳，由 transform 記錄並計入 failed
        match self.normalizer.normalize(&input, &source)? {
            Outcome::Normalized(output) => {
                self.storage.write_file(&target, &output).await?;
                summary.normalized += 1;
            }
            // 原因已由 normalizer 以 error 等級記錄
            Outcome::Skipped(_) => summary.skipped += 1,
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for IconPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Symbol>> {
        tracing::debug!("Reading symbols from: {}", self.config.symbols_file());
        let data = self.storage.read_file(self.config.symbols_file()).await?;
        let symbols = parse_symbols(&data)?;

        if let Err(e) = self.restore_raw_cache().await {
            tracing::warn!("⚠️ Could not extract {}: {}", archive_path(self.config.raw_dir()), e);
        }

        if self.config.fetch_enabled() {
            self.download_missing(&symbols).await?;
        }

        Ok(symbols)
    }

    async fn transform(&self, symbols: Vec<Symbol>) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        for symbol in &symbols {
            if let Err(e) = self.process_symbol(symbol, &mut summary).await {
                tracing::error!("❌ {}: {}", symbol.svg_name(), e);
                summary.failed += 1;
            }
        }

        tracing::info!(
            "SVG processing: {} normalized, {} up to date, {} not downloaded, {} skipped, {} failed",
            summary.normalized,
            summary.up_to_date,
            summary.missing,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    async fn load(&self, _summary: TransformSummary) -> Result<String> {
        let (content, count) = pack_directory(&self.storage, self.config.processed_dir()).await?;

        let output = self.config.output_file();
        self.storage.write_file(output, content.as_bytes()).await?;
        tracing::info!("Wrote {} icons to {}", count, output);

        Ok(output.to_string())
    }
}
