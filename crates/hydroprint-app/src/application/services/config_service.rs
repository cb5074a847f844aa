use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::info;

/// Overrides the platform config directory (also used as data directory)
pub const CONFIG_DIR_ENV: &str = "HYDROPRINT_CONFIG_DIR";

const CONFIG_FILE: &str = "app_config.json";
const DATABASE_FILE: &str = "hydroprint.db";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// Application configuration service
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    database_path: Option<PathBuf>,
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl ConfigService {
    /// Resolve directories from `HYDROPRINT_CONFIG_DIR` or the platform defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                Self::new(dir.clone(), dir)
            }
            None => {
                let config_dir = dirs::config_dir()
                    .context("Failed to get config dir")?
                    .join("hydroprint");
                let data_dir = dirs::data_local_dir()
                    .context("Failed to get data dir")?
                    .join("hydroprint");
                Self::new(config_dir, data_dir)
            }
        }
    }

    pub fn new(config_dir: PathBuf, data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config dir {:?}", config_dir))?;

        let config_path = config_dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_default()
        } else {
            AppConfig::default()
        };

        info!("Config loaded from: {:?}", config_path);

        Ok(Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            database_path: config.database_path,
            config_dir,
            data_dir,
        })
    }

    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Set log level and persist to disk; takes effect on the next start
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        self.log_level.store(level as u8, Ordering::Relaxed);
        self.persist()?;

        info!("Log level set to {} in {:?}", level.as_str(), self.config_path());
        Ok(())
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            log_level: self.get_log_level(),
            database_path: self.database_path.clone(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Configured database file, else `<data dir>/hydroprint.db`
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATABASE_FILE))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.config())?;
        std::fs::write(self.config_path(), content)?;
        Ok(())
    }
}
