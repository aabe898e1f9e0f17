//! Layered CLI configuration
//!
//! Later layers win:
//! 1. built-in defaults
//! 2. TOML file (`--config <path>`, else `./assetcat.toml` when present)
//! 3. environment (`ASSETCAT_DB`, `ASSETCAT_EDITOR`, `ASSETCAT_LOG`; a
//!    `.env` file is loaded first by `main`)
//! 4. command-line flags

use std::path::{Path, PathBuf};

use assetcat_core::logging_facility::Profile;
use clap::Args;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = ".assetcat/catalog.db";
pub const DEFAULT_EDITOR: &str = "system";
pub const DEFAULT_CONFIG_FILE: &str = "assetcat.toml";

pub const ENV_DB: &str = "ASSETCAT_DB";
pub const ENV_EDITOR: &str = "ASSETCAT_EDITOR";
pub const ENV_LOG: &str = "ASSETCAT_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {origin} setting: {reason}")]
    Invalid { origin: &'static str, reason: String },
}

/// Global flags shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// TOML config file (defaults to ./assetcat.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Editor id stamped on every change
    #[arg(long, global = true)]
    pub editor: Option<String>,

    /// Log profile: development, production or test
    #[arg(long, global = true)]
    pub log: Option<String>,
}

/// `assetcat.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    db: Option<PathBuf>,
    editor: Option<String>,
    log: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub editor: String,
    pub log: Profile,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            editor: DEFAULT_EDITOR.to_string(),
            log: Profile::Development,
        }
    }
}

impl CliConfig {
    /// Resolve from process environment and the working directory
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, Path::new("."), |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit base directory and environment lookup
    pub fn resolve(
        args: &ConfigArgs,
        base_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = CliConfig::default();

        let file = match &args.config {
            Some(path) => Some(read_file(path)?),
            None => {
                let path = base_dir.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Some(read_file(&path)?)
                } else {
                    None
                }
            }
        };
        if let Some(file) = file {
            config.apply("config file", file.db, file.editor, file.log)?;
        }

        config.apply(
            "environment",
            env(ENV_DB).map(PathBuf::from),
            env(ENV_EDITOR),
            env(ENV_LOG),
        )?;

        config.apply(
            "command-line",
            args.db.clone(),
            args.editor.clone(),
            args.log.clone(),
        )?;

        Ok(config)
    }

    fn apply(
        &mut self,
        origin: &'static str,
        db: Option<PathBuf>,
        editor: Option<String>,
        log: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(db) = db {
            self.db_path = db;
        }
        if let Some(editor) = editor {
            let editor = editor.trim();
            if editor.is_empty() {
                return Err(ConfigError::Invalid {
                    origin,
                    reason: "editor must not be blank".to_string(),
                });
            }
            self.editor = editor.to_string();
        }
        if let Some(log) = log {
            self.log = log
                .parse()
                .map_err(|reason| ConfigError::Invalid { origin, reason })?;
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_any_layer() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::resolve(&ConfigArgs::default(), dir.path(), no_env).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.db_path, PathBuf::from(".assetcat/catalog.db"));
    }

    #[test]
    fn test_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "db = \"from-file.db\"\neditor = \"file-user\"\nlog = \"production\"\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [(ENV_EDITOR, "env-user")].into_iter().collect();
        let args = ConfigArgs {
            log: Some("test".to_string()),
            ..ConfigArgs::default()
        };

        let config =
            CliConfig::resolve(&args, dir.path(), |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.db_path, PathBuf::from("from-file.db"));
        assert_eq!(config.editor, "env-user");
        assert_eq!(config.log, Profile::Test);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConfigArgs {
            config: Some(dir.path().join("missing.toml")),
            ..ConfigArgs::default()
        };
        assert!(matches!(
            CliConfig::resolve(&args, dir.path(), no_env),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_and_bad_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "database = \"x.db\"\n").unwrap();
        let args = ConfigArgs {
            config: Some(path),
            ..ConfigArgs::default()
        };
        assert!(matches!(
            CliConfig::resolve(&args, dir.path(), no_env),
            Err(ConfigError::Parse { .. })
        ));

        let blank_editor = ConfigArgs {
            editor: Some("  ".to_string()),
            ..ConfigArgs::default()
        };
        assert!(matches!(
            CliConfig::resolve(&blank_editor, dir.path(), no_env),
            Err(ConfigError::Invalid {
                origin: "command-line",
                ..
            })
        ));
    }
}
