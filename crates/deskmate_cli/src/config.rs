//! Command-line flags and path resolution.
//!
//! # Invariants
//! - Resolved directories are absolute.
//! - The data directory is picked from the flag, then `DESKMATE_DATA_DIR`,
//!   then the platform data directory, then `./.deskmate`.

use clap::Parser;
use deskmate_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "DESKMATE_DATA_DIR";
const FALLBACK_DATA_DIR: &str = ".deskmate";
const LOG_SUBDIR: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "deskmate")]
#[command(version, about = "Personal assistant for contacts and notes")]
pub struct Cli {
    /// Directory holding addressbook.json and notes.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Directory for rolling log files (default: <data-dir>/logs)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
    /// trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub color: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentDir(err) => write!(f, "cannot determine current directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
        }
    }
}

impl AppConfig {
    /// Resolves settings against the process environment.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Ok(Self::resolve_with(cli, env_dir, platform_data_dir(), &cwd))
    }

    /// Resolution with every environment input passed explicitly.
    pub fn resolve_with(
        cli: &Cli,
        env_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Self {
        let data_dir = cli
            .data_dir
            .clone()
            .or(env_dir)
            .or(platform_dir)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR));
        let data_dir = absolutize(data_dir, cwd);
        let log_dir = match &cli.log_dir {
            Some(dir) => absolutize(dir.clone(), cwd),
            None => data_dir.join(LOG_SUBDIR),
        };
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            data_dir,
            log_dir,
            log_level,
            color: !cli.no_color,
        }
    }
}

fn platform_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "deskmate").map(|dirs| dirs.data_dir().to_path_buf())
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Cli};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deskmate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flag_wins_over_env_and_platform() {
        let cwd = Path::new("/work");
        let config = AppConfig::resolve_with(
            &cli(&["--data-dir", "data", "--no-color"]),
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/platform")),
            cwd,
        );
        assert_eq!(config.data_dir, PathBuf::from("/work/data"));
        assert_eq!(config.log_dir, PathBuf::from("/work/data/logs"));
        assert!(!config.color);
    }

    #[test]
    fn env_then_platform_then_local_fallback() {
        let cwd = Path::new("/work");
        let from_env = AppConfig::resolve_with(
            &cli(&[]),
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/platform")),
            cwd,
        );
        assert_eq!(from_env.data_dir, PathBuf::from("/env"));

        let from_platform =
            AppConfig::resolve_with(&cli(&[]), None, Some(PathBuf::from("/platform")), cwd);
        assert_eq!(from_platform.data_dir, PathBuf::from("/platform"));

        let fallback = AppConfig::resolve_with(&cli(&[]), None, None, cwd);
        assert_eq!(fallback.data_dir, PathBuf::from("/work/.deskmate"));
        assert!(fallback.color);
    }

    #[test]
    fn explicit_log_dir_and_level_are_kept() {
        let config = AppConfig::resolve_with(
            &cli(&["--log-dir", "/var/log/deskmate", "--log-level", "warn"]),
            None,
            None,
            Path::new("/work"),
        );
        assert_eq!(config.log_dir, PathBuf::from("/var/log/deskmate"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["deskmate", "--colour"]).is_err());
    }
}
