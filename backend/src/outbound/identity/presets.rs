//! Endpoint presets for the supported login providers.

use std::fmt;

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use super::IdentitySetupError;
use super::oauth_provider::{OAuthEndpoints, OAuthProviderSettings, ProfileMapping};

const ID_AND_EMAIL: ProfileMapping = ProfileMapping {
    subject: "/id",
    email: "/email",
};

const OIDC_CLAIMS: ProfileMapping = ProfileMapping {
    subject: "/sub",
    email: "/email",
};

/// Which provider a set of credentials belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    /// github.com
    GitHub,
    /// A self-hosted Gitea instance at `base_url`.
    Gitea {
        /// Root of the instance, e.g. `https://gitea.example.com`.
        base_url: Url,
    },
    /// discord.com
    Discord,
    /// Google accounts.
    Google,
    /// twitch.tv
    Twitch,
    /// Any OpenID Connect issuer.
    Oidc {
        /// The issuer's `.well-known/openid-configuration` document.
        discovery_url: Url,
    },
}

impl ProviderKind {
    /// Name used in login URLs and stored with users.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::Gitea { .. } => "gitea",
            Self::Discord => "discord",
            Self::Google => "google",
            Self::Twitch => "twitch",
            Self::Oidc { .. } => "oidc",
        }
    }
}

/// Credentials for one enabled provider.
#[derive(Clone)]
pub struct ProviderConfig {
    kind: ProviderKind,
    client_id: String,
    client_secret: Zeroizing<String>,
}

impl ProviderConfig {
    /// Pair a provider with its client credentials.
    pub fn new(
        kind: ProviderKind,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }

    /// The provider these credentials are for.
    #[must_use]
    pub const fn kind(&self) -> &ProviderKind {
        &self.kind
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Endpoints advertised by an OpenID Connect discovery document.
#[derive(Debug, Deserialize)]
pub(crate) struct DiscoveryDocument {
    authorization_endpoint: Url,
    token_endpoint: Url,
    userinfo_endpoint: Url,
}

impl From<DiscoveryDocument> for OAuthEndpoints {
    fn from(document: DiscoveryDocument) -> Self {
        Self {
            authorize: document.authorization_endpoint,
            token: document.token_endpoint,
            profile: document.userinfo_endpoint,
        }
    }
}

/// Fetch and decode an issuer's discovery document.
pub(crate) async fn discover(
    client: &reqwest::Client,
    discovery_url: &Url,
) -> Result<OAuthEndpoints, IdentitySetupError> {
    let document: DiscoveryDocument = client
        .get(discovery_url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| IdentitySetupError::discovery(discovery_url, err))?
        .json()
        .await
        .map_err(|err| IdentitySetupError::discovery(discovery_url, err))?;
    Ok(document.into())
}

fn parse(raw: &str) -> Result<Url, IdentitySetupError> {
    Url::parse(raw).map_err(IdentitySetupError::from)
}

fn fixed_endpoints(
    authorize: &str,
    token: &str,
    profile: &str,
) -> Result<OAuthEndpoints, IdentitySetupError> {
    Ok(OAuthEndpoints {
        authorize: parse(authorize)?,
        token: parse(token)?,
        profile: parse(profile)?,
    })
}

fn gitea_endpoints(base_url: &Url) -> Result<OAuthEndpoints, IdentitySetupError> {
    let root = base_url.as_str().trim_end_matches('/');
    Ok(OAuthEndpoints {
        authorize: parse(&format!("{root}/login/oauth/authorize"))?,
        token: parse(&format!("{root}/login/oauth/access_token"))?,
        profile: parse(&format!("{root}/api/v1/user"))?,
    })
}

/// `{base_address}/api/v1/auth/callback?provider={name}`.
pub(crate) fn callback_url(base_address: &Url, name: &str) -> Result<Url, IdentitySetupError> {
    let root = base_address.as_str().trim_end_matches('/');
    let mut url = parse(&format!("{root}/api/v1/auth/callback"))?;
    url.query_pairs_mut().append_pair("provider", name);
    Ok(url)
}

/// Resolve endpoints, scopes and profile mapping for `config`.
pub(crate) async fn settings_for(
    config: ProviderConfig,
    base_address: &Url,
    client: &reqwest::Client,
) -> Result<OAuthProviderSettings, IdentitySetupError> {
    let name = config.kind.name();
    let mut profile_headers = Vec::new();
    let (endpoints, scopes, mapping) = match &config.kind {
        ProviderKind::GitHub => (
            fixed_endpoints(
                "https://github.com/login/oauth/authorize",
                "https://github.com/login/oauth/access_token",
                "https://api.github.com/user",
            )?,
            vec!["read:user", "user:email"],
            ID_AND_EMAIL,
        ),
        ProviderKind::Gitea { base_url } => (gitea_endpoints(base_url)?, Vec::new(), ID_AND_EMAIL),
        ProviderKind::Discord => (
            fixed_endpoints(
                "https://discord.com/oauth2/authorize",
                "https://discord.com/api/oauth2/token",
                "https://discord.com/api/users/@me",
            )?,
            vec!["identify", "email"],
            ID_AND_EMAIL,
        ),
        ProviderKind::Google => (
            fixed_endpoints(
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                "https://openidconnect.googleapis.com/v1/userinfo",
            )?,
            vec!["openid", "email"],
            OIDC_CLAIMS,
        ),
        ProviderKind::Twitch => {
            profile_headers.push(("Client-Id", config.client_id.clone()));
            (
                fixed_endpoints(
                    "https://id.twitch.tv/oauth2/authorize",
                    "https://id.twitch.tv/oauth2/token",
                    "https://api.twitch.tv/helix/users",
                )?,
                vec!["user:read:email"],
                ProfileMapping {
                    subject: "/data/0/id",
                    email: "/data/0/email",
                },
            )
        }
        ProviderKind::Oidc { discovery_url } => (
            discover(client, discovery_url).await?,
            vec!["openid", "email"],
            OIDC_CLAIMS,
        ),
    };
    Ok(OAuthProviderSettings {
        name: name.to_owned(),
        redirect_url: callback_url(base_address, name)?,
        client_id: config.client_id,
        client_secret: config.client_secret,
        endpoints,
        scopes,
        mapping,
        profile_headers,
    })
}
