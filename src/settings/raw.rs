use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use reel::{CatalogOptions, TrendingOptions};

use crate::cli::CliArgs;

use super::resolved::{ResolvedConfig, SettingSource, SettingsError};
use super::util::{sanitize_headers, trim_base_url};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_TRENDING_LIMIT: usize = 5;
const MAX_TRENDING_LIMIT: usize = 20;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    catalog: CatalogSection,
    trending: TrendingSection,
    ui: UiSection,
    #[serde(skip)]
    sources: SourceMap,
}

/// Catalog connection options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
    base_url: Option<String>,
    api_key: Option<String>,
    image_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Analytics sink options prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TrendingSection {
    endpoint: Option<String>,
    api_key: Option<String>,
    limit: Option<usize>,
}

/// UI related configuration values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    title: Option<String>,
    initial_query: Option<String>,
    theme: Option<String>,
    debounce_ms: Option<u64>,
    headers: Option<Vec<String>>,
}

/// Tracks which layer supplied each setting, keyed by its dotted name.
#[derive(Debug, Clone, Default)]
struct SourceMap(HashMap<&'static str, SettingSource>);

impl SourceMap {
    fn note_config(&mut self, key: &'static str, provided: bool) {
        if provided {
            self.0.insert(key, SettingSource::Config);
        }
    }

    fn note_cli(&mut self, key: &'static str) {
        self.0.insert(key, SettingSource::Cli);
    }

    fn get(&self, key: &'static str) -> SettingSource {
        self.0.get(key).copied().unwrap_or(SettingSource::Default)
    }
}

impl RawConfig {
    /// Record which settings the merged config/environment layers supplied.
    /// Must run before [`RawConfig::apply_cli_overrides`].
    pub(super) fn note_config_sources(&mut self) {
        let mut sources = std::mem::take(&mut self.sources);
        sources.note_config("catalog.base_url", self.catalog.base_url.is_some());
        sources.note_config("catalog.api_key", self.catalog.api_key.is_some());
        sources.note_config(
            "catalog.image_base_url",
            self.catalog.image_base_url.is_some(),
        );
        sources.note_config("catalog.timeout_secs", self.catalog.timeout_secs.is_some());
        sources.note_config("trending.endpoint", self.trending.endpoint.is_some());
        sources.note_config("trending.api_key", self.trending.api_key.is_some());
        sources.note_config("trending.limit", self.trending.limit.is_some());
        sources.note_config("ui.debounce_ms", self.ui.debounce_ms.is_some());
        self.sources = sources;
    }

    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.base_url.clone() {
            self.catalog.base_url = Some(value);
            self.sources.note_cli("catalog.base_url");
        }
        if let Some(value) = cli.api_key.clone() {
            self.catalog.api_key = Some(value);
            self.sources.note_cli("catalog.api_key");
        }
        if let Some(value) = cli.image_base_url.clone() {
            self.catalog.image_base_url = Some(value);
            self.sources.note_cli("catalog.image_base_url");
        }
        if let Some(value) = cli.timeout_secs {
            self.catalog.timeout_secs = Some(value);
            self.sources.note_cli("catalog.timeout_secs");
        }
        if let Some(value) = cli.trending_endpoint.clone() {
            self.trending.endpoint = Some(value);
            self.sources.note_cli("trending.endpoint");
        }
        if let Some(value) = cli.trending_api_key.clone() {
            self.trending.api_key = Some(value);
            self.sources.note_cli("trending.api_key");
        }
        if let Some(value) = cli.trending_limit {
            self.trending.limit = Some(value);
            self.sources.note_cli("trending.limit");
        }
        if let Some(value) = cli.title.clone() {
            self.ui.title = Some(value);
        }
        if let Some(value) = cli.query.clone() {
            self.ui.initial_query = Some(value);
        }
        if let Some(value) = cli.theme.clone() {
            self.ui.theme = Some(value);
        }
        if let Some(value) = cli.debounce_ms {
            self.ui.debounce_ms = Some(value);
            self.sources.note_cli("ui.debounce_ms");
        }
        if let Some(value) = &cli.headers {
            self.ui.headers = Some(value.clone());
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating
    /// and filling defaults where required.
    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let api_key = match self.catalog.api_key {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            Some(key) => {
                return Err(SettingsError::InvalidValue {
                    key: "catalog.api_key",
                    value: key,
                    origin: self.sources.get("catalog.api_key"),
                    reason: "the API credential must not be blank",
                }
                .into());
            }
            None => {
                return Err(SettingsError::MissingRequired {
                    key: "catalog.api_key",
                    env: "REEL_API_KEY",
                    flag: "--api-key",
                }
                .into());
            }
        };

        let base_url = self
            .catalog
            .base_url
            .as_deref()
            .map(trim_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "catalog.base_url",
                value: self.catalog.base_url.unwrap_or_default(),
                origin: self.sources.get("catalog.base_url"),
                reason: "the base URL must not be blank",
            }
            .into());
        }

        let timeout = match self.catalog.timeout_secs {
            Some(0) => {
                return Err(SettingsError::InvalidValue {
                    key: "catalog.timeout_secs",
                    value: "0".into(),
                    origin: self.sources.get("catalog.timeout_secs"),
                    reason: "the timeout must be at least one second",
                }
                .into());
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let debounce_ms = self.ui.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
        if debounce_ms == 0 {
            return Err(SettingsError::InvalidValue {
                key: "ui.debounce_ms",
                value: "0".into(),
                origin: self.sources.get("ui.debounce_ms"),
                reason: "the quiescence window must be at least one millisecond",
            }
            .into());
        }

        let image_base_url = self
            .catalog
            .image_base_url
            .as_deref()
            .map(trim_base_url)
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

        let trending = match self.trending.endpoint.as_deref().map(trim_base_url) {
            Some(endpoint) if !endpoint.is_empty() => {
                let limit = self.trending.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
                if limit == 0 || limit > MAX_TRENDING_LIMIT {
                    return Err(SettingsError::InvalidValue {
                        key: "trending.limit",
                        value: limit.to_string(),
                        origin: self.sources.get("trending.limit"),
                        reason: "the trending limit must be between 1 and 20",
                    }
                    .into());
                }
                Some(TrendingOptions {
                    endpoint,
                    api_key: self.trending.api_key,
                    limit,
                    image_base_url,
                })
            }
            _ => None,
        };

        let headers = self
            .ui
            .headers
            .map(sanitize_headers)
            .filter(|headers| !headers.is_empty());

        Ok(ResolvedConfig {
            catalog: CatalogOptions {
                base_url,
                api_key,
                timeout,
            },
            trending,
            input_title: self.ui.title,
            initial_query: self.ui.initial_query.unwrap_or_default(),
            theme: self.ui.theme,
            debounce: Duration::from_millis(debounce_ms),
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli_with(args: &[&str]) -> CliArgs {
        let mut full = vec!["reel"];
        full.extend_from_slice(args);
        CliArgs::parse_from(full)
    }

    fn raw_with_key() -> RawConfig {
        let mut raw = RawConfig::default();
        raw.catalog.api_key = Some("file-key".into());
        raw.note_config_sources();
        raw
    }

    #[test]
    fn cli_overrides_take_precedence_over_config_values() {
        let mut raw = raw_with_key();
        raw.ui.debounce_ms = Some(250);
        let cli = cli_with(&["--api-key", "cli-key", "--debounce-ms", "100"]);
        raw.apply_cli_overrides(&cli);

        let resolved = raw.resolve().expect("resolves");
        assert_eq!(resolved.catalog.api_key, "cli-key");
        assert_eq!(resolved.debounce, Duration::from_millis(100));
    }

    #[test]
    fn missing_api_key_is_rejected_with_guidance() {
        let raw = RawConfig::default();
        let err = raw.resolve().expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("catalog.api_key"));
        assert!(message.contains("REEL_API_KEY"));
        assert!(message.contains("--api-key"));
    }

    #[test]
    fn blank_api_key_names_its_source() {
        let mut raw = RawConfig::default();
        raw.catalog.api_key = Some("   ".into());
        raw.note_config_sources();
        let err = raw.resolve().expect_err("must fail");
        assert!(err.to_string().contains("config file or environment"));
    }

    #[test]
    fn zero_debounce_window_is_rejected() {
        let mut raw = raw_with_key();
        let cli = cli_with(&["--debounce-ms", "0"]);
        raw.apply_cli_overrides(&cli);
        let err = raw.resolve().expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("ui.debounce_ms"));
        assert!(message.contains("command line"));
    }

    #[test]
    fn oversized_trending_limit_is_rejected() {
        let mut raw = raw_with_key();
        raw.trending.endpoint = Some("https://analytics.example.test/metrics".into());
        raw.trending.limit = Some(50);
        raw.note_config_sources();
        let err = raw.resolve().expect_err("must fail");
        assert!(err.to_string().contains("trending.limit"));
    }

    #[test]
    fn defaults_fill_in_when_nothing_is_configured() {
        let resolved = raw_with_key().resolve().expect("resolves");
        assert_eq!(resolved.catalog.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.debounce, Duration::from_millis(500));
        assert!(resolved.trending.is_none());
        assert!(resolved.catalog.timeout.is_none());
    }

    #[test]
    fn trending_activates_with_an_endpoint_and_keeps_the_image_base() {
        let mut raw = raw_with_key();
        raw.trending.endpoint = Some("https://analytics.example.test/metrics/".into());
        raw.note_config_sources();
        let resolved = raw.resolve().expect("resolves");
        let trending = resolved.trending.expect("trending enabled");
        assert_eq!(trending.endpoint, "https://analytics.example.test/metrics");
        assert_eq!(trending.limit, DEFAULT_TRENDING_LIMIT);
        assert_eq!(trending.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }
}
