//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.daybook/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DaybookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub posts_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DownloadConfig {
    pub dir: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_POSTS_DIR: &str = "blog_posts";
pub const DEFAULT_LOG_FILE: &str = "daybook.log";
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Technology", "Lifestyle", "Education", "Other"];
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub posts_dir: PathBuf,
    pub download_dir: PathBuf,
    pub categories: Vec<String>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.daybook/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".daybook"))
}

/// Returns the path to `~/.daybook/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.daybook/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DaybookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DaybookConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DaybookConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<DaybookConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DaybookConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DaybookConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Daybook Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# posts_dir = "blog_posts"           # Or set DAYBOOK_POSTS_DIR; relative to the working directory
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"; or DAYBOOK_LOG
# log_file = "daybook.log"           # Path relative to ~/.daybook/

# [editor]
# categories = ["Technology", "Lifestyle", "Education", "Other"]

# [download]
# dir = "/home/me/Downloads"         # Or set DAYBOOK_DOWNLOAD_DIR
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_posts_dir` is the `--dir` flag, `verbose` is `--verbose`.
pub fn resolve(config: &DaybookConfig, cli_posts_dir: Option<&Path>, verbose: bool) -> ResolvedConfig {
    resolve_with_env(config, cli_posts_dir, verbose, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with the environment lookup injected.
pub fn resolve_with_env<F>(
    config: &DaybookConfig,
    cli_posts_dir: Option<&Path>,
    verbose: bool,
    env: F,
) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Posts dir: CLI → env → config → default
    let posts_dir = cli_posts_dir
        .map(Path::to_path_buf)
        .or_else(|| env("DAYBOOK_POSTS_DIR").map(PathBuf::from))
        .or_else(|| config.general.posts_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR));

    // Download dir: env → config → platform downloads → cwd
    let download_dir = env("DAYBOOK_DOWNLOAD_DIR")
        .map(PathBuf::from)
        .or_else(|| config.download.dir.clone())
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let categories = match &config.editor.categories {
        Some(list) if !list.is_empty() => list.clone(),
        _ => DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
    };

    // Log level: --verbose → env → config → default
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        env("DAYBOOK_LOG")
            .or_else(|| config.general.log_level.clone())
            .and_then(|s| LevelFilter::from_str(s.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    };

    // Relative log paths live next to the config file
    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let log_file = if log_file.is_absolute() {
        Some(log_file)
    } else {
        config_dir().map(|d| d.join(log_file))
    };

    ResolvedConfig {
        posts_dir,
        download_dir,
        categories,
        log_level,
        log_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = DaybookConfig::default();
        assert!(config.general.posts_dir.is_none());
        assert!(config.editor.categories.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = DaybookConfig::default();
        let resolved = resolve_with_env(&config, None, false, no_env);
        assert_eq!(resolved.posts_dir, PathBuf::from("blog_posts"));
        assert_eq!(resolved.categories, DEFAULT_CATEGORIES);
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = DaybookConfig {
            general: GeneralConfig {
                posts_dir: Some(PathBuf::from("/srv/blog")),
                log_level: Some("warn".to_string()),
                log_file: Some(PathBuf::from("/var/log/daybook.log")),
            },
            editor: EditorConfig {
                categories: Some(vec!["Travel".to_string()]),
            },
            download: DownloadConfig {
                dir: Some(PathBuf::from("/tmp/out")),
            },
        };
        let resolved = resolve_with_env(&config, None, false, no_env);
        assert_eq!(resolved.posts_dir, PathBuf::from("/srv/blog"));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, Some(PathBuf::from("/var/log/daybook.log")));
        assert_eq!(resolved.categories, vec!["Travel"]);
        assert_eq!(resolved.download_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_resolve_env_beats_config_cli_beats_env() {
        let config = DaybookConfig {
            general: GeneralConfig {
                posts_dir: Some(PathBuf::from("from-config")),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "DAYBOOK_POSTS_DIR").then(|| "from-env".to_string());

        let resolved = resolve_with_env(&config, None, false, env);
        assert_eq!(resolved.posts_dir, PathBuf::from("from-env"));

        let resolved = resolve_with_env(&config, Some(Path::new("from-cli")), false, env);
        assert_eq!(resolved.posts_dir, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_verbose_forces_debug() {
        let config = DaybookConfig {
            general: GeneralConfig {
                log_level: Some("error".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, true, no_env);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let env = |key: &str| (key == "DAYBOOK_LOG").then(|| "loud".to_string());
        let resolved = resolve_with_env(&DaybookConfig::default(), None, false, env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_empty_category_list_uses_defaults() {
        let config = DaybookConfig {
            editor: EditorConfig {
                categories: Some(vec![]),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, false, no_env);
        assert_eq!(resolved.categories.len(), 4);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only the posts dir is set; everything else stays default
        let toml_str = r#"
[general]
posts_dir = "journal"
"#;
        let config: DaybookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.posts_dir, Some(PathBuf::from("journal")));
        assert!(config.general.log_level.is_none());
        assert!(config.download.dir.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
posts_dir = "journal"
log_level = "debug"

[editor]
categories = ["Work", "Home"]

[download]
dir = "/tmp/dl"
"#;
        let config: DaybookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.editor.categories.as_deref(),
            Some(&["Work".to_string(), "Home".to_string()][..])
        );
        assert_eq!(config.download.dir, Some(PathBuf::from("/tmp/dl")));
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.posts_dir.is_none());

        // The generated file is all comments, so it parses back to defaults
        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.starts_with("# Daybook Configuration"));
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.editor.categories.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nposts_dir = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
