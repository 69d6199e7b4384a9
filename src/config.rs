use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// How the resulting ulimits are printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `[name=soft:hard ...]`, as shown for the ulimit flag
    #[default]
    Text,
    /// Canonical `{name: {soft, hard}}` object
    Json,
    /// Runtime descriptors, `[{Name, Soft, Hard}]`
    Runtime,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Log level (error, warn, info, debug and trace), defaults to warn
    #[arg(short, long, default_value("warn"), env("LOG_LEVEL"))]
    pub log_level: LevelFilter,

    /// Ulimit in the form name=soft[:hard], may be repeated
    #[arg(short, long = "ulimit", value_name = "NAME=SOFT[:HARD]")]
    pub ulimits: Vec<String>,

    /// Build target document (YAML or JSON) with a `ulimits` key, may be repeated
    #[arg(short, long = "file", value_name = "PATH", env("ULIMIT_FILE"))]
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let config = Config::parse_from([
            "ulimit-flags",
            "--ulimit",
            "nofile=1024:2048",
            "-u",
            "nproc=100",
            "--file",
            "target.yaml",
            "--format",
            "runtime",
        ]);
        assert_eq!(config.ulimits, ["nofile=1024:2048", "nproc=100"]);
        assert_eq!(config.files, [PathBuf::from("target.yaml")]);
        assert_eq!(config.format, OutputFormat::Runtime);
    }

    #[test]
    fn defaults() {
        let config = Config::parse_from(["ulimit-flags"]);
        assert!(config.ulimits.is_empty());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn verify() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
