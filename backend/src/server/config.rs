//! HTTP server configuration object and helpers.

use actix_web::cookie::Key;
use ludivault::domain::LoginProviders;
use ludivault::outbound::persistence::DbPool;

/// Everything the server needs once settings have been validated.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) cookie_domain: Option<String>,
    pub(crate) listen: String,
    pub(crate) db_pool: DbPool,
    pub(crate) login: LoginProviders,
}

impl ServerConfig {
    /// Construct a server configuration bound to `listen`.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        listen: impl Into<String>,
        db_pool: DbPool,
        login: LoginProviders,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            cookie_domain: None,
            listen: listen.into(),
            db_pool,
            login,
        }
    }

    /// Scope the session cookie to `domain`.
    #[must_use]
    pub fn with_cookie_domain(mut self, domain: Option<String>) -> Self {
        self.cookie_domain = domain;
        self
    }
}
