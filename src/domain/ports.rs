use crate::domain::model::{Symbol, TransformSummary};
use crate::svg::NormalizeOptions;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// Sorted paths (`dir/name`) of the files in `dir` with the given extension.
    fn list_files(
        &self,
        dir: &str,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn symbols_file(&self) -> &str;
    fn raw_dir(&self) -> &str;
    fn processed_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn force_process(&self) -> bool;
    fn fetch_enabled(&self) -> bool;
    fn user_agent(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn normalize_options(&self) -> NormalizeOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Symbol>>;
    async fn transform(&self, symbols: Vec<Symbol>) -> Result<TransformSummary>;
    async fn load(&self, summary: TransformSummary) -> Result<String>;
}
