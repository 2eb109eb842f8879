//! Server configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

/// Configuration problems detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Cookie session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC secret for session JWTs and upload URL signatures.
    pub secret: String,
    /// Session lifetime in hours (default: 168).
    pub ttl_hours: i64,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

/// Local-disk upload passthrough settings.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory for uploaded files (default: `storage/uploads`).
    pub dir: PathBuf,
    /// Where bodies are written while an upload is in flight (default:
    /// `storage/uploads-partial`). Must sit outside `dir`, which is served
    /// publicly.
    pub staging_dir: PathBuf,
    /// Lifetime of a presigned upload URL in seconds (default: 900).
    pub url_ttl_secs: i64,
    /// Largest accepted upload body (default: 50 MiB).
    pub max_bytes: u64,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub session: SessionConfig,
    /// Shared secret for the admin API. `None` disables it.
    pub admin_secret: Option<String>,
    /// Absolute origin used when building upload URLs.
    pub public_base_url: String,
    pub upload: UploadConfig,
    /// Prebuilt client served as a fallback for non-API paths.
    pub static_dir: Option<PathBuf>,
    /// Email verification token lifetime in hours (default: 48).
    pub verification_ttl_hours: i64,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `DATABASE_URL`           | required                 |
    /// | `HOST`                   | `0.0.0.0`                |
    /// | `PORT`                   | `3000`                   |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                     |
    /// | `SESSION_SECRET`         | required                 |
    /// | `SESSION_TTL_HOURS`      | `168`                    |
    /// | `COOKIE_SECURE`          | `false`                  |
    /// | `ADMIN_SECRET`           | unset                    |
    /// | `PUBLIC_BASE_URL`        | `http://localhost:3000`  |
    /// | `UPLOAD_DIR`             | `storage/uploads`        |
    /// | `UPLOAD_URL_TTL_SECS`    | `900`                    |
    /// | `MAX_UPLOAD_BYTES`       | `52428800`               |
    /// | `STATIC_DIR`             | unset                    |
    /// | `VERIFICATION_TTL_HOURS` | `48`                     |
    /// | `LOG_FORMAT`             | `pretty`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let secret = var("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'pretty' or 'json'".into(),
                })
            }
        };

        let session = SessionConfig {
            secret,
            ttl_hours: parse_positive(var("SESSION_TTL_HOURS"), "SESSION_TTL_HOURS", 168)?,
            cookie_secure: parse_or(var("COOKIE_SECURE"), "COOKIE_SECURE", false)?,
        };

        let upload = UploadConfig {
            dir: PathBuf::from(var("UPLOAD_DIR").unwrap_or_else(|| "storage/uploads".into())),
            staging_dir: PathBuf::from(
                var("UPLOAD_STAGING_DIR").unwrap_or_else(|| "storage/uploads-partial".into()),
            ),
            url_ttl_secs: parse_positive(var("UPLOAD_URL_TTL_SECS"), "UPLOAD_URL_TTL_SECS", 900)?,
            max_bytes: parse_or(var("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES", 52_428_800)?,
        };

        Ok(Self {
            database_url,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(var("PORT"), "PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30)?,
            session,
            admin_secret: var("ADMIN_SECRET"),
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".into())
                .trim_end_matches('/')
                .to_string(),
            upload,
            static_dir: var("STATIC_DIR").map(PathBuf::from),
            verification_ttl_hours: parse_positive(
                var("VERIFICATION_TTL_HOURS"),
                "VERIFICATION_TTL_HOURS",
                48,
            )?,
            log_format,
        })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: name,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_positive(raw: Option<String>, name: &'static str, default: i64) -> Result<i64, ConfigError> {
    let value = parse_or(raw, name, default)?;
    if value <= 0 {
        return Err(ConfigError::Invalid {
            var: name,
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/box"),
        ("SESSION_SECRET", "s3cret"),
    ];

    #[test]
    fn defaults_applied() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.session.ttl_hours, 168);
        assert!(!config.session.cookie_secure);
        assert!(config.admin_secret.is_none());
        assert_eq!(config.upload.max_bytes, 52_428_800);
        assert_eq!(config.upload.url_ttl_secs, 900);
        assert_eq!(config.verification_ttl_hours, 48);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn missing_session_secret_is_an_error() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/box")]).unwrap_err();
        assert_matches!(err, ConfigError::Missing("SESSION_SECRET"));
    }

    #[test]
    fn empty_session_secret_counts_as_missing() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/box"),
            ("SESSION_SECRET", "  "),
        ])
        .unwrap_err();
        assert_matches!(err, ConfigError::Missing("SESSION_SECRET"));
    }

    #[test]
    fn invalid_port_reported() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = load(&pairs).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", .. });
    }

    #[test]
    fn overrides_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("COOKIE_SECURE", "true"),
            ("ADMIN_SECRET", "letmein"),
            ("PUBLIC_BASE_URL", "https://box.example/"),
            ("LOG_FORMAT", "json"),
        ]);
        let config = load(&pairs).unwrap();
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.session.cookie_secure);
        assert_eq!(config.admin_secret.as_deref(), Some("letmein"));
        assert_eq!(config.public_base_url, "https://box.example");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SESSION_TTL_HOURS", "0"));
        assert_matches!(
            load(&pairs),
            Err(ConfigError::Invalid {
                var: "SESSION_TTL_HOURS",
                ..
            })
        );
    }
}
