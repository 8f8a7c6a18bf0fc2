//! Login provider adapters.
//!
//! Every supported provider is an [`OAuthProvider`] configured from a preset;
//! [`build_login_providers`] turns the configured credentials into the
//! registry the HTTP layer serves logins from.

mod oauth_provider;
mod presets;

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::domain::LoginProviders;
use crate::domain::ports::IdentityProvider;

pub use oauth_provider::{OAuthEndpoints, OAuthProvider, OAuthProviderSettings, ProfileMapping};
pub use presets::{ProviderConfig, ProviderKind};

/// Failures building the provider registry at start-up.
#[derive(Debug, thiserror::Error)]
pub enum IdentitySetupError {
    /// No provider had complete credentials.
    #[error("no login providers configured")]
    NoProviders,
    /// A preset or callback URL did not parse.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// An OpenID Connect discovery document could not be fetched.
    #[error("OIDC discovery at {url} failed: {message}")]
    Discovery {
        /// Discovery document location.
        url: String,
        /// Underlying failure.
        message: String,
    },
}

impl IdentitySetupError {
    fn discovery(url: &Url, err: impl std::fmt::Display) -> Self {
        Self::Discovery {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Build one provider per configured credential set.
///
/// # Errors
/// Fails when nothing is configured, a URL is invalid, or OIDC discovery
/// fails.
pub async fn build_login_providers(
    configs: Vec<ProviderConfig>,
    base_address: &Url,
) -> Result<LoginProviders, IdentitySetupError> {
    if configs.is_empty() {
        return Err(IdentitySetupError::NoProviders);
    }
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build()?;
    let mut providers: Vec<Arc<dyn IdentityProvider>> = Vec::with_capacity(configs.len());
    for config in configs {
        let settings = presets::settings_for(config, base_address, &client).await?;
        info!(provider = %settings.name, "login provider enabled");
        providers.push(Arc::new(OAuthProvider::new(settings)?));
    }
    Ok(LoginProviders::new(providers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("https://games.example.test").expect("valid url")
    }

    #[rstest]
    #[tokio::test]
    async fn nothing_configured_is_an_error() {
        let err = build_login_providers(Vec::new(), &base())
            .await
            .expect_err("empty config");
        assert_eq!(err.to_string(), "no login providers configured");
    }

    #[rstest]
    #[tokio::test]
    async fn configured_presets_are_registered_by_name() {
        let configs = vec![
            ProviderConfig::new(ProviderKind::GitHub, "gh", "secret"),
            ProviderConfig::new(ProviderKind::Discord, "dc", "secret"),
        ];
        let providers = build_login_providers(configs, &base()).await.expect("providers");
        assert_eq!(providers.names().collect::<Vec<_>>(), ["discord", "github"]);
        let login = providers
            .get("github")
            .expect("github registered")
            .authorization_url("state-1");
        assert_eq!(login.host_str(), Some("github.com"));
    }
}
