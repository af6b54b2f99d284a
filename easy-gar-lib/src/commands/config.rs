use crate::Result;
use crate::catalog::{Catalog, CustomDimension, CustomMetric};
use crate::reporting::{DEFAULT_BACKOFF_UNIT, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, FetchOptions, MAX_PAGE_SIZE, SamplingLevel};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "easy_gar.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reporting view to query when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,

    /// URL report requests are posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Rows requested per page (1..=10000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub sampling_level: SamplingLevel,

    /// Upper bound on a single page request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Unit of the exponential backoff between retries
    #[serde(default = "default_backoff_unit", with = "humantime_serde")]
    pub backoff_unit: Duration,

    /// Additional catalog metrics
    #[serde(default)]
    pub metrics: Vec<CustomMetric>,

    /// Additional catalog dimensions
    #[serde(default)]
    pub dimensions: Vec<CustomDimension>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

const fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_backoff_unit() -> Duration {
    DEFAULT_BACKOFF_UNIT
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `easy_gar.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading easy-gar configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no {CONFIG_FILE_NAME} in '{base_dir}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading easy-gar configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or custom entries are malformed
    pub fn validate(&self) -> Result<()> {
        if let Some(view_id) = &self.view_id
            && view_id.trim().is_empty()
        {
            return Err(app_err!("view_id must not be empty"));
        }

        let url = Url::parse(&self.endpoint).into_app_err_with(|| format!("endpoint '{}' is not a valid URL", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("endpoint must be an http or https URL, got '{}'", self.endpoint));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(app_err!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        let mut keys = HashSet::new();
        for metric in &self.metrics {
            if metric.key.trim().is_empty() {
                return Err(app_err!("custom metric with expression '{}' has an empty key", metric.expression));
            }

            if metric.expression.trim().is_empty() {
                return Err(app_err!("custom metric '{}' has an empty expression", metric.key));
            }

            if !keys.insert(metric.key.as_str()) {
                return Err(app_err!("custom metric '{}' is defined more than once", metric.key));
            }
        }

        keys.clear();
        for dimension in &self.dimensions {
            if dimension.key.trim().is_empty() {
                return Err(app_err!("custom dimension with name '{}' has an empty key", dimension.name));
            }

            if dimension.name.trim().is_empty() {
                return Err(app_err!("custom dimension '{}' has an empty name", dimension.key));
            }

            if !keys.insert(dimension.key.as_str()) {
                return Err(app_err!("custom dimension '{}' is defined more than once", dimension.key));
            }
        }

        Ok(())
    }

    /// The built-in catalog with this configuration's custom entries layered on top.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin().with_custom(&self.metrics, &self.dimensions)
    }

    #[must_use]
    pub const fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            request_timeout: self.request_timeout,
            backoff_unit: self.backoff_unit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_id: None,
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            sampling_level: SamplingLevel::default(),
            request_timeout: default_request_timeout(),
            backoff_unit: default_backoff_unit(),
            metrics: Vec::new(),
            dimensions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_validate_page_size_zero() {
        let config = Config { page_size: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_page_size_too_large() {
        let config = Config { page_size: MAX_PAGE_SIZE + 1, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_page_size_boundaries() {
        Config { page_size: 1, ..Config::default() }.validate().unwrap();
        Config { page_size: MAX_PAGE_SIZE, ..Config::default() }.validate().unwrap();
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { request_timeout: Duration::ZERO, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_endpoint() {
        let config = Config { endpoint: "not a url".into(), ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { endpoint: "ftp://example.com/x".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_view_id() {
        let config = Config { view_id: Some(" ".into()), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_custom_metric() {
        let metric = CustomMetric {
            key: "signups".into(),
            expression: "ga:goal1Completions".into(),
            alias: String::new(),
            formatting_type: None,
        };
        let config = Config { metrics: vec![metric.clone(), metric], ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_custom_fields() {
        let config = Config {
            dimensions: vec![CustomDimension { key: "plan".into(), name: String::new(), alias: String::new() }],
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            metrics: vec![CustomMetric { key: String::new(), expression: "ga:x".into(), alias: String::new(), formatting_type: None }],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
view_id = "42"
page_size = 500
sampling_level = "LARGE"
request_timeout = "15s"
backoff_unit = "250ms"

[[metrics]]
key = "signups"
expression = "ga:goal3Completions"
alias = "Signups"
formatting_type = "INTEGER"

[[dimensions]]
key = "plan"
name = "ga:dimension1"
"#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.view_id.as_deref(), Some("42"));
        assert_eq!(config.sampling_level, SamplingLevel::Large);
        assert_eq!(config.fetch_options().request_timeout, Duration::from_secs(15));
        assert_eq!(config.fetch_options().backoff_unit, Duration::from_millis(250));

        let catalog = config.catalog();
        assert_eq!(catalog.metric("signups").unwrap().alias(), Some("Signups"));
        assert_eq!(catalog.dimension("plan").unwrap().display_name(), "ga:dimension1");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<Config>("view = \"42\"").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from(dir.path().to_string_lossy().to_string());
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("missing.toml");
        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from(dir.path().to_string_lossy().to_string());
        fs::write(base.join(CONFIG_FILE_NAME), "view_id = \"7\"\n").unwrap();

        assert_eq!(Config::load(&base, None).unwrap().view_id.as_deref(), Some("7"));
    }
}
