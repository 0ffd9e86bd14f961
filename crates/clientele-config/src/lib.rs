use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clientele_core::domain::CustomerCategory;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "clientele";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
pub const MAX_UPCOMING_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upcoming_days: i64,
    pub default_category: CustomerCategory,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            default_category: CustomerCategory::New,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid upcoming_days value: {0}")]
    InvalidUpcomingDays(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CategoryFile {
    New,
    Regular,
    Vip,
}

impl From<CategoryFile> for CustomerCategory {
    fn from(value: CategoryFile) -> Self {
        match value {
            CategoryFile::New => CustomerCategory::New,
            CategoryFile::Regular => CustomerCategory::Regular,
            CategoryFile::Vip => CustomerCategory::Vip,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    upcoming_days: Option<i64>,
    default_category: Option<CategoryFile>,
}

/// Loads configuration. An explicit path must exist; the default location
/// falls back to built-in values when the file or home directory is missing.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let path = match config_path {
        Some(path) => {
            let path = resolve_config_path(Some(path))?;
            return load_at_path(&path, true).map(Option::unwrap_or_default);
        }
        None => match default_config_path() {
            Ok(path) => path,
            Err(ConfigError::MissingHomeDir | ConfigError::InvalidConfigPath(_)) => {
                return Ok(AppConfig::default())
            }
            Err(err) => return Err(err),
        },
    };
    Ok(load_at_path(&path, false)?.unwrap_or_default())
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) if path.as_os_str().is_empty() => Err(ConfigError::InvalidConfigPath(path)),
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

fn default_config_path() -> Result<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        Some(dir) if dir.as_os_str().is_empty() => {
            return Err(ConfigError::InvalidConfigPath(dir))
        }
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or(ConfigError::MissingHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(days) = parsed.upcoming_days {
        if !(1..=MAX_UPCOMING_DAYS).contains(&days) {
            return Err(ConfigError::InvalidUpcomingDays(days));
        }
        config.upcoming_days = days;
    }

    if let Some(category) = parsed.default_category {
        config.default_category = category.into();
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, CategoryFile, ConfigError, ConfigFile};
    use clientele_core::domain::CustomerCategory;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            upcoming_days: Some(14),
            default_category: Some(CategoryFile::Vip),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.upcoming_days, 14);
        assert_eq!(merged.default_category, CustomerCategory::Vip);
    }

    #[test]
    fn merge_config_rejects_out_of_range_window() {
        for days in [0, -3, 366] {
            let parsed = ConfigFile {
                upcoming_days: Some(days),
                default_category: None,
            };
            let err = merge_config(parsed).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUpcomingDays(value) if value == days));
        }
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "upcoming_days = 3\ndefault_category = \"regular\"\n")
            .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.upcoming_days, 3);
        assert_eq!(config.default_category, CustomerCategory::Regular);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "upcoming_days = 3\ntheme = \"dark\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
