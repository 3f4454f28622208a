use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "discogs-listings",
    about = "Fetch the Discogs marketplace listings page for a release",
    version
)]
pub struct Cli {
    /// Release identifier, e.g. 249504
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub release: Option<String>,

    /// Read the release identifier from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Config file [default: ./.discogs-listings/config.toml, fallback ~/.config/discogs-listings/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the page body to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the summary and progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_release() {
        let cli = Cli::try_parse_from(["discogs-listings", "249504"]).unwrap();
        assert_eq!(cli.release.as_deref(), Some("249504"));
        assert!(!cli.stdin);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_release_or_stdin_required() {
        assert!(Cli::try_parse_from(["discogs-listings"]).is_err());
        assert!(Cli::try_parse_from(["discogs-listings", "--stdin"]).is_ok());
        assert!(Cli::try_parse_from(["discogs-listings", "1", "--stdin"]).is_err());
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::try_parse_from(["discogs-listings", "1", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
