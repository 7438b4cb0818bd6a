use crate::svg::geometry::parse_length;
use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_entries(field_name: &str, values: &[String]) -> Result<()> {
    for value in values {
        validate_non_empty_string(field_name, value)?;
    }
    Ok(())
}

/// 尺寸必須有數值前綴，例如 `10mm`
pub fn validate_length(field_name: &str, value: &str) -> Result<()> {
    if parse_length(value).is_none() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a length such as 10mm or 24px".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("symbol.url", "https://upload.wikimedia.org/a.svg").is_ok());
        assert!(validate_url("symbol.url", "http://example.com").is_ok());
        assert!(validate_url("symbol.url", "").is_err());
        assert!(validate_url("symbol.url", "invalid-url").is_err());
        assert!(validate_url("symbol.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("paths.raw_dir", "sources/raw").is_ok());
        assert!(validate_path("paths.raw_dir", "").is_err());
        assert!(validate_path("paths.raw_dir", "a\0b").is_err());
    }

    #[test]
    fn test_validate_length() {
        assert!(validate_length("normalize.size_policy.width", "10mm").is_ok());
        assert!(validate_length("normalize.size_policy.width", "mm").is_err());
    }

    #[test]
    fn test_validate_entries_and_range() {
        let prefixes = vec!["-inkscape".to_string(), " ".to_string()];
        assert!(validate_non_empty_entries("normalize.editor_prefixes", &prefixes).is_err());
        assert!(validate_range("fetch.timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("fetch.timeout_seconds", 0u64, 1, 600).is_err());
    }
}
