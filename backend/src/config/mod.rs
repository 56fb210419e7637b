//! Central module for application-wide configuration settings.
//!
//! Everything is read from `TASKBOARD_*` environment variables once at
//! startup: the listen address, the remote API base URL, the identity
//! provider registration, and session/timeout tuning.

use std::net::SocketAddr;
use std::time::Duration;

use taskboard_adapters::oidc::OidcConfig;
use thiserror::Error;
use url::Url;

/// Variable holding the tracing filter. Read by `main` before the rest of
/// the configuration so that configuration errors can be logged.
pub const LOG_ENV: &str = "TASKBOARD_LOG";

const BIND: &str = "TASKBOARD_BIND";
const API_URL: &str = "TASKBOARD_API_URL";
const OIDC_AUTHORITY: &str = "TASKBOARD_OIDC_AUTHORITY";
const OIDC_CLIENT_ID: &str = "TASKBOARD_OIDC_CLIENT_ID";
const OIDC_REDIRECT_URI: &str = "TASKBOARD_OIDC_REDIRECT_URI";
const OIDC_SCOPES: &str = "TASKBOARD_OIDC_SCOPES";
const OIDC_LOGOUT_ENDPOINT: &str = "TASKBOARD_OIDC_LOGOUT_ENDPOINT";
const LOGOUT_URI: &str = "TASKBOARD_LOGOUT_URI";
const SESSION_IDLE_MINUTES: &str = "TASKBOARD_SESSION_IDLE_MINUTES";
const SESSION_CAPACITY: &str = "TASKBOARD_SESSION_CAPACITY";
const HTTP_TIMEOUT_SECS: &str = "TASKBOARD_HTTP_TIMEOUT_SECS";
const SECURE_COOKIES: &str = "TASKBOARD_SECURE_COOKIES";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/callback";
const DEFAULT_SCOPES: &str = "email openid phone";
const DEFAULT_LOGOUT_URI: &str = "http://localhost:3000/";
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;
const DEFAULT_SESSION_CAPACITY: u64 = 10_000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_base_url: Url,
    pub oidc: OidcConfig,
    pub session_idle: Duration,
    /// Most sessions held at once; the least recently used go first.
    pub session_capacity: u64,
    pub http_timeout: Duration,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let oidc = OidcConfig {
            authority: vars.url(OIDC_AUTHORITY, None)?,
            client_id: vars.required(OIDC_CLIENT_ID)?,
            redirect_uri: vars.url(OIDC_REDIRECT_URI, Some(DEFAULT_REDIRECT_URI))?,
            scopes: vars.get(OIDC_SCOPES).unwrap_or_else(|| DEFAULT_SCOPES.to_string()),
            logout_endpoint: vars.optional_url(OIDC_LOGOUT_ENDPOINT)?,
            logout_uri: vars.url(LOGOUT_URI, Some(DEFAULT_LOGOUT_URI))?,
        };

        Ok(Config {
            bind_addr: vars.parse(BIND, DEFAULT_BIND)?,
            api_base_url: vars.url(API_URL, None)?,
            oidc,
            session_idle: vars.minutes(SESSION_IDLE_MINUTES, DEFAULT_SESSION_IDLE_MINUTES)?,
            session_capacity: vars.number(SESSION_CAPACITY, DEFAULT_SESSION_CAPACITY)?,
            http_timeout: Duration::from_secs(
                vars.number(HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?,
            ),
            secure_cookies: vars.flag(SECURE_COOKIES)?,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Set and non-blank.
    fn get(&self, var: &str) -> Option<String> {
        (self.0)(var)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, var: &'static str) -> Result<String, ConfigError> {
        self.get(var).ok_or(ConfigError::Missing(var))
    }

    fn url(&self, var: &'static str, default: Option<&str>) -> Result<Url, ConfigError> {
        let raw = match (self.get(var), default) {
            (Some(raw), _) => raw,
            (None, Some(default)) => default.to_string(),
            (None, None) => return Err(ConfigError::Missing(var)),
        };
        parse_url(var, &raw)
    }

    fn optional_url(&self, var: &'static str) -> Result<Option<Url>, ConfigError> {
        self.get(var).map(|raw| parse_url(var, &raw)).transpose()
    }

    fn parse<T>(&self, var: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.get(var).unwrap_or_else(|| default.to_string());
        raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        })
    }

    fn number(&self, var: &'static str, default: u64) -> Result<u64, ConfigError> {
        let value = self.parse::<u64>(var, &default.to_string())?;
        if value == 0 {
            return Err(ConfigError::Invalid {
                var,
                reason: "must be greater than zero".into(),
            });
        }
        Ok(value)
    }

    fn minutes(&self, var: &'static str, default: u64) -> Result<Duration, ConfigError> {
        self.number(var, default)?
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::Invalid {
                var,
                reason: "too large".into(),
            })
    }

    fn flag(&self, var: &'static str) -> Result<bool, ConfigError> {
        match self.get(var).as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("0" | "false" | "no") => Ok(false),
            Some("1" | "true" | "yes") => Ok(true),
            Some(other) => Err(ConfigError::Invalid {
                var,
                reason: format!("expected true or false, got {other:?}"),
            }),
        }
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            (API_URL, "https://api.example.com/Prod"),
            (OIDC_AUTHORITY, "https://idp.example.com/pool"),
            (OIDC_CLIENT_ID, "client-123"),
        ]
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = Config::from_lookup(lookup(&minimal())).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.oidc.scopes, "email openid phone");
        assert_eq!(config.oidc.redirect_uri.as_str(), DEFAULT_REDIRECT_URI);
        assert!(config.oidc.logout_endpoint.is_none());
        assert_eq!(config.session_idle, Duration::from_secs(3600));
        assert_eq!(config.session_capacity, 10_000);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(!config.secure_cookies);
    }

    #[test]
    fn missing_api_url_is_reported() {
        let vars: Vec<_> = minimal().into_iter().filter(|(k, _)| *k != API_URL).collect();
        assert_eq!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Missing(API_URL)
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let vars: Vec<_> = minimal()
            .into_iter()
            .map(|(k, v)| if k == OIDC_CLIENT_ID { (k, "   ") } else { (k, v) })
            .collect();
        assert_eq!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Missing(OIDC_CLIENT_ID)
        );
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let mut vars = minimal();
        vars.push((HTTP_TIMEOUT_SECS, "soon"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: HTTP_TIMEOUT_SECS, .. })
        ));

        let mut vars = minimal();
        vars.push((SECURE_COOKIES, "maybe"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: SECURE_COOKIES, .. })
        ));
    }

    #[test]
    fn oversized_idle_timeout_is_rejected() {
        let mut vars = minimal();
        vars.push((SESSION_IDLE_MINUTES, "18446744073709551615"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { var: SESSION_IDLE_MINUTES, .. })
        ));
    }

    #[test]
    fn overrides_are_applied() {
        let mut vars = minimal();
        vars.extend([
            (BIND, "0.0.0.0:8080"),
            (OIDC_LOGOUT_ENDPOINT, "https://auth.example.com/logout"),
            (SESSION_IDLE_MINUTES, "5"),
            (SESSION_CAPACITY, "250"),
            (SECURE_COOKIES, "TRUE"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.oidc.logout_endpoint.unwrap().as_str(),
            "https://auth.example.com/logout"
        );
        assert_eq!(config.session_idle, Duration::from_secs(300));
        assert_eq!(config.session_capacity, 250);
        assert!(config.secure_cookies);
    }
}
