//! Port for third-party login providers.
//!
//! A provider turns a CSRF `state` token into the URL the browser is sent to,
//! then exchanges the authorisation code it gets back for the user's
//! identity.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;
use crate::domain::ProviderIdentity;

define_port_error! {
    /// Failures talking to a login provider.
    pub enum IdentityProviderError {
        /// The authorisation code could not be exchanged for a token.
        Exchange { message: String } => "token exchange failed: {message}",
        /// The provider's profile response lacked a usable identity.
        Profile { message: String } => "profile lookup failed: {message}",
    }
}

/// A configured OAuth 2.0 or OpenID Connect provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Name used in URLs and stored with the user, e.g. `github`.
    fn name(&self) -> &str;

    /// Where to send the browser to start a login carrying `state`.
    fn authorization_url(&self, state: &str) -> Url;

    /// Exchange an authorisation code for the caller's identity.
    async fn exchange(&self, code: &str) -> Result<ProviderIdentity, IdentityProviderError>;
}

/// Provider returning a fixed identity, for tests and local development.
#[derive(Debug, Clone)]
pub struct FixtureIdentityProvider {
    name: String,
    authorize_url: Url,
    subject: String,
    email: String,
}

impl FixtureIdentityProvider {
    /// Provider named `name` that redirects to `authorize_url` and always
    /// logs in `subject`.
    pub fn new(
        name: impl Into<String>,
        authorize_url: Url,
        subject: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            authorize_url,
            subject: subject.into(),
            email: email.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut().append_pair("state", state);
        url
    }

    async fn exchange(&self, code: &str) -> Result<ProviderIdentity, IdentityProviderError> {
        if code.is_empty() {
            return Err(IdentityProviderError::exchange("empty authorisation code"));
        }
        ProviderIdentity::new(&self.subject, &self.name, self.email.clone())
            .map_err(|err| IdentityProviderError::profile(err.to_string()))
    }
}
