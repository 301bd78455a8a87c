//! Daemon settings.
//!
//! Read from `hbnb.toml` (or the file named by `HBNB_CONFIG`), then
//! overridden by `HBNB_*` environment variables. A missing file is not an
//! error; every setting has a default.

use serde::Deserialize;

const DEFAULT_PATH: &str = "hbnb.toml";

/// Settings for one `hbnbd` process.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

/// `[api]`: where the REST API listens.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

/// `[storage]`
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSettings {
    /// `sqlx` `SQLite` URL, e.g. `sqlite:hbnb.db?mode=rwc` or `sqlite::memory:`.
    pub url: String,
}

/// `[log]`
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:hbnb.db?mode=rwc".into(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "hbnbd=info,hbnb=info,tower_http=debug".into(),
        }
    }
}

impl Settings {
    /// Resolve the settings of this process from its config file and
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails when the config file cannot be read or parsed, when an
    /// environment override cannot be parsed, or when the result is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let path = env("HBNB_CONFIG").unwrap_or_else(|| DEFAULT_PATH.into());

        let mut settings = match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        settings.override_with(env)?;
        settings.check()?;
        Ok(settings)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn override_with(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = env("HBNB_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env("HBNB_API_PORT") {
            self.api.port = port.parse().map_err(|_| ConfigError::Env {
                key: "HBNB_API_PORT",
                value: port,
            })?;
        }
        if let Some(url) = env("HBNB_DATABASE_URL") {
            self.storage.url = url;
        }
        // RUST_LOG wins over HBNB_LOG
        if let Some(filter) = env("RUST_LOG").or_else(|| env("HBNB_LOG")) {
            self.log.filter = filter;
        }
        Ok(())
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.api.port == 0 {
            return Err(ConfigError::Invalid("api.port must not be 0"));
        }
        if self.api.host.trim().is_empty() {
            return Err(ConfigError::Invalid("api.host must not be empty"));
        }
        if self.storage.url.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.url must not be empty"));
        }
        Ok(())
    }

    /// `host:port` for the API listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Why settings could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn should_default_to_port_5000_on_all_interfaces() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr(), "0.0.0.0:5000");
        assert_eq!(settings.storage.url, "sqlite:hbnb.db?mode=rwc");
        assert!(settings.check().is_ok());
    }

    #[test]
    fn should_parse_empty_file_as_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.api.port, 5000);
        assert_eq!(settings.log.filter, LogSettings::default().filter);
    }

    #[test]
    fn should_parse_every_section() {
        let settings = Settings::parse(
            r#"
            [api]
            host = "127.0.0.1"
            port = 8080

            [storage]
            url = "sqlite:/var/lib/hbnb/hbnb.db"

            [log]
            filter = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
        assert_eq!(settings.storage.url, "sqlite:/var/lib/hbnb/hbnb.db");
        assert_eq!(settings.log.filter, "debug");
    }

    #[test]
    fn should_keep_defaults_for_omitted_keys() {
        let settings = Settings::parse("[api]\nport = 5001\n").unwrap();
        assert_eq!(settings.bind_addr(), "0.0.0.0:5001");
    }

    #[test]
    fn should_reject_unknown_keys() {
        assert!(matches!(
            Settings::parse("[api]\nprot = 5001\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut settings = Settings::default();
        settings
            .override_with(env(&[
                ("HBNB_API_HOST", "localhost"),
                ("HBNB_API_PORT", "5001"),
                ("HBNB_DATABASE_URL", "sqlite::memory:"),
                ("HBNB_LOG", "warn"),
            ]))
            .unwrap();
        assert_eq!(settings.bind_addr(), "localhost:5001");
        assert_eq!(settings.storage.url, "sqlite::memory:");
        assert_eq!(settings.log.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_hbnb_log() {
        let mut settings = Settings::default();
        settings
            .override_with(env(&[("HBNB_LOG", "warn"), ("RUST_LOG", "trace")]))
            .unwrap();
        assert_eq!(settings.log.filter, "trace");
    }

    #[test]
    fn should_fail_on_unparsable_port_override() {
        let mut settings = Settings::default();
        let err = settings
            .override_with(env(&[("HBNB_API_PORT", "http")]))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"invalid value "http" for HBNB_API_PORT"#);
    }

    #[test]
    fn should_reject_port_zero() {
        let mut settings = Settings::default();
        settings.api.port = 0;
        assert!(matches!(settings.check(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn should_reject_blank_storage_url() {
        let mut settings = Settings::default();
        settings.storage.url = " ".into();
        assert!(matches!(settings.check(), Err(ConfigError::Invalid(_))));
    }
}
