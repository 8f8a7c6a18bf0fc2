//! Reqwest-backed OAuth 2.0 authorisation-code adapter.
//!
//! One type serves every supported provider: presets differ only in their
//! endpoints, scopes, extra headers and where the profile JSON keeps the
//! subject id and email.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::ProviderIdentity;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};

const USER_AGENT: &str = concat!("ludivault/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// JSON pointers locating the identity inside a profile response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMapping {
    /// Pointer to the provider's subject id (string or number).
    pub subject: &'static str,
    /// Pointer to the email; a missing or null email is stored empty.
    pub email: &'static str,
}

/// The three endpoints of the authorisation-code flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    /// Where the browser is sent to consent.
    pub authorize: Url,
    /// Where codes are exchanged for access tokens.
    pub token: Url,
    /// Where the access token is exchanged for the user's profile.
    pub profile: Url,
}

/// Everything needed to build an [`OAuthProvider`].
pub struct OAuthProviderSettings {
    /// Name used in URLs and stored with users.
    pub name: String,
    /// Client id issued by the provider.
    pub client_id: String,
    /// Client secret issued by the provider.
    pub client_secret: Zeroizing<String>,
    /// Flow endpoints.
    pub endpoints: OAuthEndpoints,
    /// Scopes requested on login.
    pub scopes: Vec<&'static str>,
    /// Callback registered with the provider.
    pub redirect_url: Url,
    /// Where the profile keeps the identity.
    pub mapping: ProfileMapping,
    /// Sent with the profile request; Twitch wants its `Client-Id` here.
    pub profile_headers: Vec<(&'static str, String)>,
}

/// Login provider speaking the OAuth 2.0 authorisation-code flow.
pub struct OAuthProvider {
    name: String,
    client_id: String,
    client_secret: Zeroizing<String>,
    endpoints: OAuthEndpoints,
    scopes: Vec<&'static str>,
    redirect_url: Url,
    mapping: ProfileMapping,
    profile_headers: Vec<(&'static str, String)>,
    client: Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl OAuthProvider {
    /// Build the provider and its HTTP client.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: OAuthProviderSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            name: settings.name,
            client_id: settings.client_id,
            client_secret: settings.client_secret,
            endpoints: settings.endpoints,
            scopes: settings.scopes,
            redirect_url: settings.redirect_url,
            mapping: settings.mapping,
            profile_headers: settings.profile_headers,
            client,
        })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoints.token.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_url.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|err| IdentityProviderError::exchange(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityProviderError::exchange(status_message(status)));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| IdentityProviderError::exchange(format!("invalid token response: {err}")))?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Value, IdentityProviderError> {
        let request = self
            .profile_headers
            .iter()
            .fold(
                self.client.get(self.endpoints.profile.clone()),
                |request, (name, value)| request.header(*name, value.as_str()),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(access_token);
        let response = request
            .send()
            .await
            .map_err(|err| IdentityProviderError::profile(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IdentityProviderError::profile(status_message(status)));
        }
        response
            .json()
            .await
            .map_err(|err| IdentityProviderError::profile(format!("invalid profile JSON: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for OAuthProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.endpoints.authorize.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_url.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state);
        url
    }

    async fn exchange(&self, code: &str) -> Result<ProviderIdentity, IdentityProviderError> {
        if code.is_empty() {
            return Err(IdentityProviderError::exchange("empty authorisation code"));
        }
        let access_token = Zeroizing::new(self.fetch_access_token(code).await?);
        let profile = self.fetch_profile(&access_token).await?;
        identity_from_profile(&self.name, self.mapping, &profile)
    }
}

/// Extract the identity selected by `mapping` from a profile document.
pub(crate) fn identity_from_profile(
    provider_name: &str,
    mapping: ProfileMapping,
    profile: &Value,
) -> Result<ProviderIdentity, IdentityProviderError> {
    let subject = match profile.pointer(mapping.subject) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(IdentityProviderError::profile(format!(
                "no subject at {}",
                mapping.subject
            )));
        }
    };
    let email = profile
        .pointer(mapping.email)
        .and_then(Value::as_str)
        .unwrap_or_default();
    ProviderIdentity::new(&subject, provider_name, email)
        .map_err(|err| IdentityProviderError::profile(err.to_string()))
}

fn status_message(status: StatusCode) -> String {
    format!("provider answered with status {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const GITHUB: ProfileMapping = ProfileMapping {
        subject: "/id",
        email: "/email",
    };

    #[fixture]
    fn provider() -> OAuthProvider {
        let url = |raw: &str| Url::parse(raw).expect("valid url");
        OAuthProvider::new(OAuthProviderSettings {
            name: "github".to_owned(),
            client_id: "client-123".to_owned(),
            client_secret: Zeroizing::new("secret".to_owned()),
            endpoints: OAuthEndpoints {
                authorize: url("https://github.com/login/oauth/authorize"),
                token: url("https://github.com/login/oauth/access_token"),
                profile: url("https://api.github.com/user"),
            },
            scopes: vec!["read:user", "user:email"],
            redirect_url: url("https://games.example.test/api/v1/auth/callback?provider=github"),
            mapping: GITHUB,
            profile_headers: Vec::new(),
        })
        .expect("client builds")
    }

    #[rstest]
    fn authorization_url_carries_the_flow_parameters(provider: OAuthProvider) {
        let url = provider.authorization_url("xyz");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("client_id".to_owned(), "client-123".to_owned())));
        assert!(pairs.contains(&("response_type".to_owned(), "code".to_owned())));
        assert!(pairs.contains(&("scope".to_owned(), "read:user user:email".to_owned())));
        assert!(pairs.contains(&("state".to_owned(), "xyz".to_owned())));
        assert!(pairs.contains(&(
            "redirect_uri".to_owned(),
            "https://games.example.test/api/v1/auth/callback?provider=github".to_owned()
        )));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_codes_are_rejected_before_any_request(provider: OAuthProvider) {
        let err = provider.exchange("").await.expect_err("empty code");
        assert!(matches!(err, IdentityProviderError::Exchange { .. }));
    }

    #[rstest]
    fn numeric_subjects_are_stringified() {
        let profile = json!({ "id": 583231, "email": "octo@example.test" });
        let identity = identity_from_profile("github", GITHUB, &profile).expect("identity");
        assert_eq!(identity.provider_id(), "583231");
        assert_eq!(identity.provider_name(), "github");
        assert_eq!(identity.email(), "octo@example.test");
    }

    #[rstest]
    fn nested_pointers_reach_into_arrays() {
        let mapping = ProfileMapping {
            subject: "/data/0/id",
            email: "/data/0/email",
        };
        let profile = json!({ "data": [{ "id": "141981764", "email": "t@example.test" }] });
        let identity = identity_from_profile("twitch", mapping, &profile).expect("identity");
        assert_eq!(identity.provider_id(), "141981764");
    }

    #[rstest]
    fn private_emails_are_stored_empty() {
        let profile = json!({ "id": 1, "email": null });
        let identity = identity_from_profile("github", GITHUB, &profile).expect("identity");
        assert_eq!(identity.email(), "");
    }

    #[rstest]
    fn profiles_without_a_subject_fail() {
        let err = identity_from_profile("github", GITHUB, &json!({ "login": "octo" }))
            .expect_err("no subject");
        assert!(matches!(err, IdentityProviderError::Profile { .. }));
    }
}
