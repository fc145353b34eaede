use std::fmt;
use std::time::Duration;

use thiserror::Error;

use reel::{CatalogOptions, TrendingOptions};

/// Where a setting's effective value came from, for error attribution and
/// the `--print-config` summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    Default,
    /// A config file or the `REEL__*` environment.
    Config,
    Cli,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SettingSource::Default => "built-in default",
            SettingSource::Config => "config file or environment",
            SettingSource::Cli => "command line",
        };
        f.write_str(label)
    }
}

/// Validation failures raised while resolving the configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{key} is required (set it in a config file, the {env} environment variable, or {flag})")]
    MissingRequired {
        key: &'static str,
        env: &'static str,
        flag: &'static str,
    },
    // The field cannot be called `source`: thiserror would wire it into
    // `Error::source()`, which needs an `Error` impl, not just `Display`.
    #[error("invalid value `{value}` for {key} (from {origin}): {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        origin: SettingSource,
        reason: &'static str,
    },
}

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub catalog: CatalogOptions,
    /// `None` disables the analytics sink entirely.
    pub trending: Option<TrendingOptions>,
    pub input_title: Option<String>,
    pub initial_query: String,
    pub theme: Option<String>,
    pub debounce: Duration,
    pub headers: Option<Vec<String>>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Catalog base URL: {}", self.catalog.base_url);
        println!("  Catalog API key: {}", mask(&self.catalog.api_key));
        match self.catalog.timeout {
            Some(timeout) => println!("  Request timeout: {}s", timeout.as_secs()),
            None => println!("  Request timeout: none"),
        }
        match &self.trending {
            Some(trending) => {
                println!("  Trending endpoint: {}", trending.endpoint);
                println!("  Trending limit: {}", trending.limit);
                println!("  Image base URL: {}", trending.image_base_url);
            }
            None => println!("  Trending: disabled (no endpoint configured)"),
        }
        println!("  Debounce window: {}ms", self.debounce.as_millis());
        println!(
            "  UI theme: {}",
            self.theme.as_deref().unwrap_or("(use the library default)")
        );
        if let Some(title) = &self.input_title {
            println!("  Prompt title: {title}");
        }
        if !self.initial_query.is_empty() {
            println!("  Initial query: {}", self.initial_query);
        }
        if let Some(headers) = &self.headers {
            println!("  Result headers: {}", headers.join(", "));
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = secret.chars().take(4).collect();
        format!("{prefix}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_errors_name_their_origin_without_a_cause_chain() {
        let err = SettingsError::InvalidValue {
            key: "ui.debounce_ms",
            value: "0".into(),
            origin: SettingSource::Cli,
            reason: "the quiescence window must be at least one millisecond",
        };
        let err: &dyn std::error::Error = &err;
        assert!(err.to_string().contains("command line"));
        assert!(err.source().is_none());
    }

    #[test]
    fn masked_keys_never_echo_the_full_secret() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("abcdefgh"), "abcd****");
    }

    #[test]
    fn masking_respects_multi_byte_characters() {
        assert_eq!(mask("aключ"), "aклю****");
        assert_eq!(mask("ключ"), "****");
        assert_eq!(mask("ключ-доступа"), "ключ****");
    }

    #[test]
    fn summary_prints_without_panic() {
        let config = ResolvedConfig {
            catalog: CatalogOptions {
                base_url: "https://api.example.test/3".into(),
                api_key: "secret-key".into(),
                timeout: None,
            },
            trending: None,
            input_title: Some("Find movies".into()),
            initial_query: "dune".into(),
            theme: Some("slate".into()),
            debounce: Duration::from_millis(500),
            headers: Some(vec!["Title".into()]),
        };

        config.print_summary();
    }
}
