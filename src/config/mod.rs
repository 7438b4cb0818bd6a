pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::svg::{NormalizeOptions, SizePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_length, validate_non_empty_entries, validate_non_empty_string, validate_path,
    validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "iso7000-etl")]
#[command(about = "Normalize ISO 7000 symbol SVGs and pack them into a Typst dictionary")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON file with the symbol records
    #[arg(long)]
    pub symbols: Option<String>,

    /// Directory holding the downloaded raw SVG files
    #[arg(long)]
    pub raw_dir: Option<String>,

    /// Directory receiving the normalized SVG files
    #[arg(long)]
    pub processed_dir: Option<String>,

    /// Packed Typst dictionary
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, help = "Repeat the SVG processing even when the output exists")]
    pub force_process: bool,

    #[arg(long, help = "Download raw SVG files missing from the cache")]
    pub fetch: bool,

    #[arg(long, help = "Force width/height of every icon, e.g. 10mm")]
    pub fixed_size: Option<String>,

    #[arg(long, help = "Drop whitespace and unreferenced ids from the output")]
    pub minify: bool,

    #[arg(long, help = "Only pack the processed directory")]
    pub pack_only: bool,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

/// Effective settings after defaults, config file and command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub symbols_file: String,
    pub raw_dir: String,
    pub processed_dir: String,
    pub output_file: String,
    pub force_process: bool,
    pub fetch: bool,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub normalize: NormalizeOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbols_file: "sources/icons.json".to_string(),
            raw_dir: "sources/raw".to_string(),
            processed_dir: "sources/processed".to_string(),
            output_file: "library/src/icons.typ".to_string(),
            force_process: false,
            fetch: false,
            user_agent: concat!("iso7000-etl/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            normalize: NormalizeOptions::default(),
        }
    }
}

#[cfg(feature = "cli")]
impl Settings {
    /// 預設值 → 設定檔 → 命令列，後者覆蓋前者
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        if let Some(v) = &cli.symbols {
            settings.symbols_file = v.clone();
        }
        if let Some(v) = &cli.raw_dir {
            settings.raw_dir = v.clone();
        }
        if let Some(v) = &cli.processed_dir {
            settings.processed_dir = v.clone();
        }
        if let Some(v) = &cli.output {
            settings.output_file = v.clone();
        }
        if let Some(size) = &cli.fixed_size {
            settings.normalize.size_policy = SizePolicy::Fixed {
                width: size.clone(),
                height: size.clone(),
            };
        }
        settings.force_process |= cli.force_process;
        settings.fetch |= cli.fetch;
        settings.normalize.minify |= cli.minify;

        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("paths.symbols_file", &self.symbols_file)?;
        validate_path("paths.raw_dir", &self.raw_dir)?;
        validate_path("paths.processed_dir", &self.processed_dir)?;
        validate_path("paths.output_file", &self.output_file)?;
        validate_non_empty_string("fetch.user_agent", &self.user_agent)?;
        validate_range("fetch.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_non_empty_entries("normalize.editor_prefixes", &self.normalize.editor_prefixes)?;
        validate_non_empty_entries("normalize.gray_tokens", &self.normalize.gray_tokens)?;

        if let SizePolicy::Fixed { width, height } = &self.normalize.size_policy {
            validate_length("normalize.size_policy.width", width)?;
            validate_length("normalize.size_policy.height", height)?;
        }

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn symbols_file(&self) -> &str {
        &self.symbols_file
    }

    fn raw_dir(&self) -> &str {
        &self.raw_dir
    }

    fn processed_dir(&self) -> &str {
        &self.processed_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn force_process(&self) -> bool {
        self.force_process
    }

    fn fetch_enabled(&self) -> bool {
        self.fetch
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn normalize_options(&self) -> NormalizeOptions {
        self.normalize.clone()
    }
}
