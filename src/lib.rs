pub mod config;
pub mod core;
pub mod domain;
pub mod svg;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings};

pub use core::{etl::EtlEngine, pipeline::IconPipeline};
pub use svg::{NormalizeOptions, Normalizer, Outcome, SizePolicy, SkipReason};
pub use utils::error::{EtlError, Result};
