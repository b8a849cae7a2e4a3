use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),
    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("No config path available: neither XDG_CONFIG_HOME nor HOME is set")]
    ConfigPathUnavailable,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: Store,
    pub probe: Probe,
    pub notifier: Notifier,
}

/// Where the endpoint list is read from
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    /// TOML file holding the list; relative paths resolve against the
    /// directory of the config file
    pub path: path::PathBuf,
    pub table: String,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Probe {
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    Log,
    Webhook,
}

impl fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierKind::Log => write!(f, "log"),
            NotifierKind::Webhook => write!(f, "webhook"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifier {
    pub kind: NotifierKind,
    pub topic: String,
    /// Required for `webhook`
    pub url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: "endpoints.toml".into(),
            table: healthcheck::orchestrator::DEFAULT_TABLE.into(),
            key: healthcheck::ENDPOINTS_KEY.into(),
        }
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            timeout_ms: healthcheck::probe::DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
            user_agent: None,
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self { kind: NotifierKind::Log, topic: "health-alerts".into(), url: None, timeout_ms: 5_000 }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/healthcheck/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("healthcheck/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Health Check Configuration:")?;
        write_title_1(f, "Store")?;
        write_1(f, "Path", &self.store.path.display())?;
        write_1(f, "Table", &self.store.table)?;
        write_1(f, "Key", &self.store.key)?;
        write_title_1(f, "Probe")?;
        write_1(f, "Timeout (ms)", &self.probe.timeout_ms)?;
        write_1(f, "User Agent", &self.probe.user_agent.as_deref().unwrap_or("default"))?;
        write_title_1(f, "Notifier")?;
        write_1(f, "Kind", &self.notifier.kind)?;
        write_1(f, "Topic", &self.notifier.topic)?;
        write_1(f, "URL", &self.notifier.url.as_deref().unwrap_or("-"))?;
        write_1(f, "Timeout (ms)", &self.notifier.timeout_ms)?;

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/healthcheck/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```rust,ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        let mut config = if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path).map_err(Error::ReadFailed)?;
            toml::from_str(raw_string.as_str())?
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            config
        };

        if config.store.path.is_relative()
            && let Some(parent) = config_path.parent()
        {
            config.store.path = parent.join(&config.store.path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::WriteFailed)?;
        }

        fs::write(path, config_str).map_err(Error::WriteFailed)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.probe.timeout_ms == 0 {
            return Err(Error::Invalid("probe.timeout_ms must be greater than zero".into()));
        }
        if self.notifier.timeout_ms == 0 {
            return Err(Error::Invalid("notifier.timeout_ms must be greater than zero".into()));
        }
        if self.notifier.topic.trim().is_empty() {
            return Err(Error::Invalid("notifier.topic must not be empty".into()));
        }
        if self.notifier.kind == NotifierKind::Webhook && self.notifier.url.is_none() {
            return Err(Error::Invalid("notifier.url is required for the webhook notifier".into()));
        }
        Ok(())
    }
}
