use std::path::PathBuf;

use url::Url;

use crate::server::error::config::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LEGACY_HOST: &str = "api.kybr.tk";
const DEFAULT_METADATA_URL: &str = "https://api.modmail.tk/metadata";

/// Application configuration sourced from the process environment.
///
/// `main` loads a `.env` file with dotenvy first, so every variable may also be set there.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `8000`).
    pub port: u16,

    /// SQLite connection string (`DATABASE_URL`), shared by the database handle and the
    /// session store.
    pub database_url: String,

    /// Discord webhook receiving lifecycle and error notifications (`WEBHOOK_URL`).
    pub webhook_url: Url,

    /// Shared secret handed to route groups through the application state (`PASSWORD`).
    pub password: String,

    /// Directory holding `index.html`, `template.html` and static assets (`STATIC_DIR`).
    pub static_dir: PathBuf,

    /// Host the legacy `/modmail` route answers on (`LEGACY_HOST`).
    pub legacy_host: String,
    /// Endpoint legacy `/modmail` requests are forwarded or redirected to (`METADATA_URL`).
    pub metadata_url: Url,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is not set
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, or `None` when unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "PORT".to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: required(&lookup, "DATABASE_URL")?,
            webhook_url: parse_url("WEBHOOK_URL", required(&lookup, "WEBHOOK_URL")?)?,
            password: required(&lookup, "PASSWORD")?,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            legacy_host: lookup("LEGACY_HOST").unwrap_or_else(|| DEFAULT_LEGACY_HOST.to_string()),
            metadata_url: parse_url(
                "METADATA_URL",
                lookup("METADATA_URL").unwrap_or_else(|| DEFAULT_METADATA_URL.to_string()),
            )?,
        })
    }

    /// `host:port` pair the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_url(name: &str, value: String) -> Result<Url, ConfigError> {
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite::memory:"),
        ("WEBHOOK_URL", "https://discord.com/api/webhooks/1/token"),
        ("PASSWORD", "hunter2"),
    ];

    /// Tests that optional variables fall back to their defaults.
    ///
    /// Expected: Ok with default host, port, static dir and legacy route settings
    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.legacy_host, "api.kybr.tk");
        assert_eq!(config.metadata_url.as_str(), "https://api.modmail.tk/metadata");
        assert_eq!(config.password, "hunter2");
    }

    /// Tests that explicit values override the defaults.
    ///
    /// Expected: Ok with the provided host and port
    #[test]
    fn reads_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("HOST", "127.0.0.1"));
        vars.push(("PORT", "3000"));
        vars.push(("LEGACY_HOST", "legacy.example"));

        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.legacy_host, "legacy.example");
    }

    /// Tests that each required variable is reported by name when missing.
    ///
    /// Expected: Err(ConfigError::MissingEnvVar) naming the absent variable
    #[test]
    fn reports_missing_required_variable() {
        for (missing, _) in REQUIRED {
            let vars: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != missing).collect();

            match Config::from_lookup(lookup_from(&vars)) {
                Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, missing),
                other => panic!("expected missing {missing}, got {other:?}"),
            }
        }
    }

    /// Tests that malformed values are rejected.
    ///
    /// Expected: Err(ConfigError::InvalidEnvVar) for a non-numeric port and a relative URL
    #[test]
    fn rejects_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidEnvVar { ref name, .. }) if name == "PORT"
        ));

        let mut vars = REQUIRED.to_vec();
        vars.retain(|(k, _)| *k != "WEBHOOK_URL");
        vars.push(("WEBHOOK_URL", "not a url"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidEnvVar { ref name, .. }) if name == "WEBHOOK_URL"
        ));
    }
}
