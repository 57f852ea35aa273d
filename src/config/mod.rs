use crate::core::rows::DEFAULT_DELIMITER;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Cell separator for roster and record pastes.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// tracing level when RUST_LOG is unset (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Show the raw cell array when listing trip records.
    #[serde(default)]
    pub show_raw_columns: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            delimiter: default_delimiter(),
            log_level: default_log_level(),
            show_raw_columns: false,
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.rtripdesk`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtripdesk")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtripdesk.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtripdesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.delimiter_char()?;
        Ok(cfg)
    }

    /// The configured delimiter as a single character.
    ///
    /// Accepts a literal character or the escapes `\t` and `tab`.
    pub fn delimiter_char(&self) -> AppResult<char> {
        match self.delimiter.as_str() {
            "\\t" | "tab" => return Ok('\t'),
            _ => {}
        }
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(AppError::Config(format!(
                "delimiter must be a single character, got {:?}",
                self.delimiter
            ))),
        }
    }

    /// Where a `--db` value points: absolute paths as given, relative
    /// ones inside the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
