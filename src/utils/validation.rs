use crate::utils::error::{PathwayError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> PathwayError {
    PathwayError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Catalog base URL: endpoint paths are joined onto it, so a query or
/// fragment would be dropped silently.
pub fn validate_api_base_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "Catalog URL cannot carry a query or fragment",
        ));
    }
    Ok(())
}

/// The store keeps one JSON file per key under this directory.
pub fn validate_store_dir(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    if Path::new(path).is_file() {
        return Err(invalid(
            field_name,
            path,
            "Path points to a file, expected a directory",
        ));
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
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_base_url() {
        assert!(validate_api_base_url("api.base_url", "https://example.com/api").is_ok());
        assert!(validate_api_base_url("api.base_url", "http://localhost:8000").is_ok());
        assert!(validate_api_base_url("api.base_url", "").is_err());
        assert!(validate_api_base_url("api.base_url", "not a url").is_err());
        assert!(validate_api_base_url("api.base_url", "ftp://example.com").is_err());
        assert!(validate_api_base_url("api.base_url", "http://localhost:8000/api?v=1").is_err());
        assert!(validate_api_base_url("api.base_url", "https://example.com/api#top").is_err());
    }

    #[test]
    fn test_validate_store_dir() {
        assert!(validate_store_dir("storage.path", "./.edu-pathway").is_ok());
        assert!(validate_store_dir("storage.path", "").is_err());
        assert!(validate_store_dir("storage.path", "bad\0path").is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        let file_path = file.path().to_string_lossy().to_string();
        assert!(validate_store_dir("storage.path", &file_path).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_store_dir("storage.path", &dir.path().to_string_lossy()).is_ok());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("api.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("api.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("api.timeout_seconds", 301u64, 1, 300).is_err());
    }
}
