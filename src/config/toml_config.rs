use crate::config::Settings;
use crate::svg::SizePolicy;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔內容；所有欄位皆可省略，未指定時沿用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: Option<PathsConfig>,
    pub fetch: Option<FetchConfig>,
    pub normalize: Option<NormalizeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub symbols_file: Option<String>,
    pub raw_dir: Option<String>,
    pub processed_dir: Option<String>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub enabled: Option<bool>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    pub editor_prefixes: Option<Vec<String>>,
    pub gray_tokens: Option<Vec<String>>,
    pub size_policy: Option<SizePolicy>,
    pub minify: Option<bool>,
    pub xml_declaration: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ICON_ROOT})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Overlay the values present in this file onto `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(paths) = &self.paths {
            if let Some(v) = &paths.symbols_file {
                settings.symbols_file = v.clone();
            }
            if let Some(v) = &paths.raw_dir {
                settings.raw_dir = v.clone();
            }
            if let Some(v) = &paths.processed_dir {
                settings.processed_dir = v.clone();
            }
            if let Some(v) = &paths.output_file {
                settings.output_file = v.clone();
            }
        }

        if let Some(fetch) = &self.fetch {
            if let Some(v) = fetch.enabled {
                settings.fetch = v;
            }
            if let Some(v) = &fetch.user_agent {
                settings.user_agent = v.clone();
            }
            if let Some(v) = fetch.timeout_seconds {
                settings.timeout_seconds = v;
            }
        }

        if let Some(normalize) = &self.normalize {
            let options = &mut settings.normalize;
            if let Some(v) = &normalize.editor_prefixes {
                options.editor_prefixes = v.clone();
            }
            if let Some(v) = &normalize.gray_tokens {
                options.gray_tokens = v.clone();
            }
            if let Some(v) = &normalize.size_policy {
                options.size_policy = v.clone();
            }
            if let Some(v) = normalize.minify {
                options.minify = v;
            }
            if let Some(v) = normalize.xml_declaration {
                options.xml_declaration = v;
            }
        }
    }
}
