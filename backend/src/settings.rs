//! Application settings loaded via OrthoConfig.
//!
//! Values come from `LUDIVAULT_*` environment variables, command-line flags
//! and configuration files. Accessors apply defaults and validate, so the
//! server only ever sees usable values.

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;
use zeroize::Zeroize;

use crate::outbound::identity::{ProviderConfig, ProviderKind};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_LISTEN: &str = "localhost:5500";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Minimum length of the configured session key, in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for settings validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing session key.
    Debug,
    /// Release builds require a session key.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Loading from environment, flags or files failed.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// A required value is absent.
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    /// A value that must be a URL is not one.
    #[error("invalid URL for {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Errors raised while preparing the session key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionKeyError {
    /// Release builds must be given a key.
    #[error("LUDIVAULT_SESSION_KEY must be set in release builds")]
    Missing,
    /// The configured key is too short to sign and encrypt cookies.
    #[error("session key too short: need >= {min_len} bytes, got {length}")]
    TooShort { length: usize, min_len: usize },
}

/// Every setting the server reads.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LUDIVAULT")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Address to listen on, `host:port`.
    pub listen: Option<String>,
    /// Public origin of the deployment, e.g. `https://games.example.com`.
    pub base_address: Option<String>,
    /// Secret of at least 64 bytes for signing and encrypting cookies.
    pub session_key: Option<String>,
    /// Drop the `Secure` attribute from the session cookie, for plain-HTTP
    /// deployments other than localhost.
    #[ortho_config(default = false)]
    pub session_cookie_insecure: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    pub github_client_id: Option<String>,
    pub github_client_secret: Option<String>,
    pub gitea_client_id: Option<String>,
    pub gitea_client_secret: Option<String>,
    /// Root of the Gitea instance.
    pub gitea_url: Option<String>,
    pub discord_client_id: Option<String>,
    pub discord_client_secret: Option<String>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub twitch_client_id: Option<String>,
    pub twitch_client_secret: Option<String>,
    pub oidc_client_id: Option<String>,
    pub oidc_client_secret: Option<String>,
    /// Issuer discovery document, usually ending in
    /// `/.well-known/openid-configuration`.
    pub oidc_discovery_url: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("listen", &self.listen())
            .field("base_address", &self.base_address)
            .field("db_max_connections", &self.db_max_connections)
            .finish_non_exhaustive()
    }
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })
}

fn parse_url(raw: &str, name: &'static str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|source| SettingsError::InvalidUrl { name, source })
}

/// Present only when every part is set; a partial set is reported and
/// skipped.
fn complete<const N: usize>(provider: &'static str, parts: [Option<&String>; N]) -> Option<[String; N]> {
    let set = parts
        .iter()
        .filter(|part| part.is_some_and(|value| !value.trim().is_empty()))
        .count();
    if set == 0 {
        return None;
    }
    if set < N {
        warn!(provider, "login provider partially configured; skipping");
        return None;
    }
    Some(parts.map(|part| part.map(|value| value.trim().to_owned()).unwrap_or_default()))
}

impl AppSettings {
    /// Load settings from the process environment and arguments.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when a source cannot be parsed.
    pub fn from_process() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os()).map_err(|error| SettingsError::Load {
            message: error.to_string(),
        })
    }

    /// PostgreSQL connection URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_ref(), "database_url")
    }

    /// Address to bind, defaulting to `localhost:5500`.
    #[must_use]
    pub fn listen(&self) -> &str {
        self.listen.as_deref().unwrap_or(DEFAULT_LISTEN)
    }

    /// Public origin used for callback URLs and the cookie domain.
    pub fn base_address(&self) -> Result<Url, SettingsError> {
        let raw = required(self.base_address.as_ref(), "base_address")?;
        parse_url(raw.trim_end_matches('/'), "base_address")
    }

    /// Host of the base address, scoping the session cookie.
    pub fn cookie_domain(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.base_address()?.host_str().map(str::to_owned))
    }

    /// Pool settings for the configured database.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)))
    }

    /// Whether the session cookie carries the `Secure` attribute. On unless
    /// explicitly opted out.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        !self.session_cookie_insecure
    }

    /// Key for the private session cookie.
    ///
    /// Debug builds without a configured key fall back to a random one, so
    /// sessions do not survive restarts.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SessionKeyError> {
        let Some(raw) = self.session_key.as_ref() else {
            return match mode {
                BuildMode::Debug => {
                    warn!("LUDIVAULT_SESSION_KEY not set; using a temporary key (dev only)");
                    Ok(Key::generate())
                }
                BuildMode::Release => Err(SessionKeyError::Missing),
            };
        };
        let mut bytes = raw.as_bytes().to_vec();
        let length = bytes.len();
        let key = if length >= SESSION_KEY_MIN_LEN {
            Key::try_from(bytes.as_slice()).map_err(|_| SessionKeyError::TooShort {
                length,
                min_len: SESSION_KEY_MIN_LEN,
            })
        } else {
            Err(SessionKeyError::TooShort {
                length,
                min_len: SESSION_KEY_MIN_LEN,
            })
        };
        bytes.zeroize();
        key
    }

    /// Credentials of every fully configured login provider.
    ///
    /// # Errors
    /// Fails when a Gitea or OIDC URL is malformed.
    pub fn login_providers(&self) -> Result<Vec<ProviderConfig>, SettingsError> {
        let mut configs = Vec::new();
        let simple = [
            (ProviderKind::GitHub, &self.github_client_id, &self.github_client_secret),
            (ProviderKind::Discord, &self.discord_client_id, &self.discord_client_secret),
            (ProviderKind::Google, &self.google_client_id, &self.google_client_secret),
            (ProviderKind::Twitch, &self.twitch_client_id, &self.twitch_client_secret),
        ];
        for (kind, id, secret) in simple {
            if let Some([id, secret]) = complete(kind.name(), [id.as_ref(), secret.as_ref()]) {
                configs.push(ProviderConfig::new(kind, id, secret));
            }
        }
        if let Some([id, secret, url]) = complete(
            "gitea",
            [
                self.gitea_client_id.as_ref(),
                self.gitea_client_secret.as_ref(),
                self.gitea_url.as_ref(),
            ],
        ) {
            let base_url = parse_url(&url, "gitea_url")?;
            configs.push(ProviderConfig::new(ProviderKind::Gitea { base_url }, id, secret));
        }
        if let Some([id, secret, url]) = complete(
            "oidc",
            [
                self.oidc_client_id.as_ref(),
                self.oidc_client_secret.as_ref(),
                self.oidc_discovery_url.as_ref(),
            ],
        ) {
            let discovery_url = parse_url(&url, "oidc_discovery_url")?;
            configs.push(ProviderConfig::new(
                ProviderKind::Oidc { discovery_url },
                id,
                secret,
            ));
        }
        Ok(configs)
    }
}
