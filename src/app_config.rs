//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tunefetch_core::parser::AudioMode;
use tunefetch_core::resolver::DEFAULT_SEARCH_TIMEOUT;

use crate::cli::Args;

/// Key-value file configuration for tunefetch defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Default destination folder.
    pub output_dir: Option<PathBuf>,
    /// Default search flavor.
    pub audio_mode: Option<AudioMode>,
    /// Path to the yt-dlp binary.
    pub ytdlp_path: Option<PathBuf>,
    /// Path to ffmpeg.
    pub ffmpeg_path: Option<PathBuf>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Timeout for one search, in seconds.
    pub search_timeout_secs: Option<u64>,
    /// Write ID3 tags after download.
    pub tag_downloads: Option<bool>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.search_timeout_secs
            && !(1..=3600).contains(&secs)
        {
            bail!("Invalid config value for `search_timeout_secs`: {secs}. Expected range: 1..=3600");
        }
        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl std::str::FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "default" => Ok(Self::Default),
            "verbose" => Ok(Self::Verbose),
            "quiet" => Ok(Self::Quiet),
            "debug" => Ok(Self::Debug),
            _ => bail!("Expected one of: default, verbose, quiet, debug"),
        }
    }
}

impl VerbositySetting {
    /// Returns the tracing level this setting maps to.
    #[must_use]
    pub fn level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose | Self::Debug => "debug",
            Self::Quiet => "error",
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/tunefetch/config.toml`
/// 2. `$HOME/.config/tunefetch/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("tunefetch")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("tunefetch")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let line_number = line_index + 1;
        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_number}");

        match key {
            "output_dir" => cfg.output_dir = Some(parse_path(value).with_context(invalid)?),
            "audio_mode" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                let mode = parsed
                    .parse::<AudioMode>()
                    .map_err(anyhow::Error::msg)
                    .with_context(invalid)?;
                cfg.audio_mode = Some(mode);
            }
            "ytdlp_path" => cfg.ytdlp_path = Some(parse_path(value).with_context(invalid)?),
            "ffmpeg_path" => cfg.ffmpeg_path = Some(parse_path(value).with_context(invalid)?),
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.verbosity = Some(parsed.parse::<VerbositySetting>().with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            "search_timeout_secs" => {
                cfg.search_timeout_secs = Some(parse_seconds(value).with_context(invalid)?);
            }
            "tag_downloads" => {
                cfg.tag_downloads = Some(parse_boolean(value).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_path(raw_value: &str) -> Result<PathBuf> {
    let path = parse_string_literal(raw_value)?;
    if path.trim().is_empty() {
        bail!("Expected a non-empty path");
    }
    Ok(PathBuf::from(path))
}

/// Whole seconds; range checks happen in [`FileConfig::validate`].
fn parse_seconds(raw_value: &str) -> Result<u64> {
    raw_value
        .parse::<u64>()
        .with_context(|| format!("Expected a whole number of seconds, got '{raw_value}'"))
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

/// Effective settings after merging CLI flags over file config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_dir: Option<PathBuf>,
    pub audio_mode: AudioMode,
    pub ytdlp_path: PathBuf,
    pub ffmpeg_path: Option<PathBuf>,
    pub search_timeout: Duration,
    pub tag_downloads: bool,
    pub log_level: &'static str,
}

/// Merges CLI flags over file config. Explicit flags always win.
///
/// Log level priority: `--quiet` > `-v/-vv` > config verbosity > info.
/// `RUST_LOG` is applied later and overrides all of these.
#[must_use]
pub fn merge_settings(args: &Args, config: Option<&FileConfig>) -> Settings {
    let file = config.cloned().unwrap_or_default();

    let log_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file.verbosity.map_or("info", VerbositySetting::level),
            1 => "debug",
            _ => "trace",
        }
    };

    Settings {
        output_dir: args.output_dir.clone().or(file.output_dir),
        audio_mode: args.mode.or(file.audio_mode).unwrap_or_default(),
        ytdlp_path: args
            .ytdlp_path
            .clone()
            .or(file.ytdlp_path)
            .unwrap_or_else(|| PathBuf::from("yt-dlp")),
        ffmpeg_path: args.ffmpeg_path.clone().or(file.ffmpeg_path),
        search_timeout: file
            .search_timeout_secs
            .map_or(DEFAULT_SEARCH_TIMEOUT, Duration::from_secs),
        tag_downloads: !args.no_tag && file.tag_downloads.unwrap_or(true),
        log_level,
    }
}
