use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use reel::app_dirs;

use super::annotations::dim_cli_annotations;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let cache_dir = match app_dirs::get_cache_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("reel {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "cache directory: {cache_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = tinted_cli_command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

/// Apply styling customisation to the generated clap command.
fn tinted_cli_command() -> Command {
    CliArgs::command().mut_args(dim_cli_annotations)
}

#[derive(Parser, Debug)]
#[command(
    name = "reel",
    version,
    long_version = long_version(),
    about = "Interactive incremental movie search for the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `reel` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "REEL_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Provide an initial search query (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the input prompt title (default: library value)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: library theme)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        help = "Set the quiescence window before a query is issued (default: 500)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Override the movie catalog API base URL (default: https://api.themoviedb.org/3)"
    )]
    pub(crate) base_url: Option<String>,
    #[arg(
        short = 'k',
        long = "api-key",
        value_name = "KEY",
        env = "REEL_API_KEY",
        hide_env_values = true,
        help = "Bearer token for the movie catalog API"
    )]
    pub(crate) api_key: Option<String>,
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        help = "Limit catalog request duration (default: none)"
    )]
    pub(crate) timeout_secs: Option<u64>,
    #[arg(
        long = "trending-endpoint",
        value_name = "URL",
        help = "Enable the trending sink against this endpoint (default: disabled)"
    )]
    pub(crate) trending_endpoint: Option<String>,
    #[arg(
        long = "trending-api-key",
        value_name = "KEY",
        env = "REEL_TRENDING_API_KEY",
        hide_env_values = true,
        help = "Credential for the trending endpoint (default: none)"
    )]
    pub(crate) trending_api_key: Option<String>,
    #[arg(
        long = "trending-limit",
        value_name = "NUM",
        help = "Number of trending entries to display (default: 5)"
    )]
    pub(crate) trending_limit: Option<usize>,
    #[arg(
        long = "image-base-url",
        value_name = "URL",
        help = "Base URL for poster images recorded by the trending sink (default: https://image.tmdb.org/t/p/w500)"
    )]
    pub(crate) image_base_url: Option<String>,
    #[arg(
        long = "headers",
        value_delimiter = ',',
        value_name = "HEADER",
        help = "Comma-separated result table headers (default: library value)"
    )]
    pub(crate) headers: Option<Vec<String>>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_supports_custom_styles() {
        let command = tinted_cli_command();
        assert!(command.get_about().is_some());
    }

    #[test]
    fn parse_cli_accepts_default_arguments() {
        let command = CliArgs::command();
        let mut matches = command.get_matches_from(vec!["reel"]);
        let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
        assert_eq!(parsed.output, OutputFormat::Plain);
        assert!(parsed.api_key.is_none() || std::env::var("REEL_API_KEY").is_ok());
    }

    #[test]
    fn overrides_parse_into_their_fields() {
        let command = CliArgs::command();
        let mut matches = command.get_matches_from(vec![
            "reel",
            "--api-key",
            "token",
            "--debounce-ms",
            "250",
            "--headers",
            "Title,Year",
        ]);
        let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
        assert_eq!(parsed.api_key.as_deref(), Some("token"));
        assert_eq!(parsed.debounce_ms, Some(250));
        assert_eq!(
            parsed.headers,
            Some(vec!["Title".to_string(), "Year".to_string()])
        );
    }
}
