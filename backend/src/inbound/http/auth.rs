//! Login through third-party identity providers.
//!
//! ```text
//! GET  /api/v1/auth/providers
//! GET  /api/v1/auth/login?provider=github            -> 302 to the provider
//! GET  /api/v1/auth/callback?provider=github&code=…&state=…  -> 302 to /
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/me
//! ```
//!
//! The login redirect stores a random CSRF state in the session; the callback
//! only proceeds when the provider echoes the same state back.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{IdentityProvider, RepositoryError};
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{LoginState, SessionContext};
use crate::inbound::http::state::HttpState;

const STATE_LENGTH: usize = 32;

/// Names of the enabled login providers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProvidersResponse {
    pub providers: Vec<String>,
}

/// Query for `GET /auth/login`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Provider name as listed by `/auth/providers`.
    pub provider: String,
}

/// Query the provider appends when redirecting back.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackQuery {
    pub provider: String,
    /// Authorisation code; absent when the user declined.
    pub code: Option<String>,
    pub state: Option<String>,
    /// Error reported by the provider instead of a code.
    pub error: Option<String>,
}

fn provider<'a>(state: &'a HttpState, name: &str) -> Result<&'a dyn IdentityProvider, Error> {
    state.login.get(name).map(|provider| provider.as_ref()).ok_or_else(|| {
        Error::invalid_request(format!("unknown login provider: {name}"))
            .with_details(json!({ "field": "provider", "value": name }))
    })
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// List the enabled login providers.
#[utoipa::path(
    get,
    path = "/api/v1/auth/providers",
    responses((status = 200, description = "Provider names", body = ProvidersResponse)),
    tags = ["auth"],
    operation_id = "listLoginProviders",
    security([])
)]
#[get("/auth/providers")]
pub async fn providers(state: web::Data<HttpState>) -> web::Json<ProvidersResponse> {
    let providers = state.login.names().map(str::to_owned).collect();
    web::Json(ProvidersResponse { providers })
}

/// Start a login by redirecting to the provider.
#[utoipa::path(
    get,
    path = "/api/v1/auth/login",
    params(LoginQuery),
    responses(
        (status = 302, description = "Redirect to the provider", headers(("Location" = String))),
        (status = 400, description = "Unknown provider", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[get("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LoginQuery>,
) -> ApiResult<HttpResponse> {
    let provider = provider(&state, &query.provider)?;
    let login = LoginState {
        provider: provider.name().to_owned(),
        state: random_state(),
    };
    session.store_login_state(&login)?;
    Ok(redirect(provider.authorization_url(&login.state).as_str()))
}

/// Finish a login: check the CSRF state, exchange the code and remember the
/// user in the session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 302, description = "Logged in; redirect to the app", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Unknown provider", body = Error),
        (status = 401, description = "Login failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "loginCallback",
    security([])
)]
#[get("/auth/callback")]
pub async fn callback(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CallbackQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let provider = provider(&state, &query.provider)?;
    let expected = session.take_login_state();

    let state_matches = matches!(
        (&expected, &query.state),
        (Some(stored), Some(echoed)) if stored.provider == query.provider && &stored.state == echoed
    );
    if !state_matches {
        warn!(provider = %query.provider, "login callback with missing or mismatched state");
        return Err(Error::unauthorized("login state mismatch"));
    }
    let Some(code) = query.code.filter(|code| !code.is_empty()) else {
        warn!(provider = %query.provider, error = ?query.error, "provider returned no code");
        return Err(Error::unauthorized("login was not completed"));
    };

    let identity = provider.exchange(&code).await.map_err(|error| {
        warn!(provider = %query.provider, %error, "login exchange failed");
        Error::unauthorized("login failed")
    })?;
    let user = state.users.upsert(identity).await?;

    session.renew();
    session.persist_user(user.id())?;
    info!(user_id = %user.id(), provider = %query.provider, "user logged in");
    Ok(redirect("/"))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Logged out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<web::Json<User>> {
    let id = session.require_user_id()?;
    let user = state.users.find_by_id(id).await.map_err(|err| match err {
        RepositoryError::NotFound { .. } => Error::unauthorized("login required"),
        other => Error::from(other),
    })?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::FixtureIdentityProvider;
    use crate::domain::{LoginProviders, ProviderIdentity, UserId};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_app_with_login};
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};
    use serde_json::Value;
    use url::Url;

    #[fixture]
    fn login_providers() -> LoginProviders {
        let authorize = Url::parse("https://id.example.test/authorize").expect("valid url");
        LoginProviders::new([Arc::new(FixtureIdentityProvider::new(
            "fixture",
            authorize,
            "4242",
            "ada@example.test",
        )) as Arc<dyn IdentityProvider>])
    }

    fn location<B>(res: &ServiceResponse<B>) -> Url {
        let raw = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location header");
        Url::parse("http://localhost")
            .and_then(|base| base.join(raw))
            .expect("valid location")
    }

    fn state_param(url: &Url) -> String {
        url.query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .expect("state parameter")
    }

    async fn start_login<S>(app: &S) -> (Cookie<'static>, String)
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = test::call_service(
            app,
            test::TestRequest::get()
                .uri("/api/v1/auth/login?provider=fixture")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        let url = location(&res);
        assert_eq!(url.host_str(), Some("id.example.test"));
        let state = state_param(&url);
        (session_cookie(&res), state)
    }

    fn stored_user(identity: &ProviderIdentity, id: UserId) -> User {
        User::new(id, identity.clone())
    }

    #[rstest]
    #[actix_web::test]
    async fn providers_are_listed(login_providers: LoginProviders) {
        let app = test::init_service(test_app_with_login(MockPorts::default(), login_providers))
            .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/providers")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"providers": ["fixture"]}));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_provider_is_rejected(login_providers: LoginProviders) {
        let app = test::init_service(test_app_with_login(MockPorts::default(), login_providers))
            .await;
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/login?provider=steam")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn login_state_is_random_and_alphanumeric(login_providers: LoginProviders) {
        let app = test::init_service(test_app_with_login(MockPorts::default(), login_providers))
            .await;
        let (_, first) = start_login(&app).await;
        let (_, second) = start_login(&app).await;
        assert_eq!(first.len(), STATE_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }

    #[rstest]
    #[actix_web::test]
    async fn full_login_sets_user_and_me_returns_it(login_providers: LoginProviders) {
        let user_id = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_upsert()
            .withf(|identity| identity.provider_id() == "4242" && identity.provider_name() == "fixture")
            .times(1)
            .returning(move |identity| Ok(stored_user(&identity, user_id)));
        ports
            .users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |id| {
                let identity = ProviderIdentity::new("4242", "fixture", "ada@example.test")
                    .expect("valid identity");
                Ok(User::new(id, identity))
            });
        let app = test::init_service(test_app_with_login(ports, login_providers)).await;

        let (cookie, state) = start_login(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!(
                    "/api/v1/auth/callback?provider=fixture&code=abc&state={state}"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res).path(), "/");
        let cookie = session_cookie(&res);

        let me_request = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(cookie)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, me_request).await;
        assert_eq!(body["id"], user_id.to_string());
        assert_eq!(body["email"], "ada@example.test");
    }

    #[rstest]
    #[case(Some("forged"), Some("abc"))]
    #[case(None, Some("abc"))]
    #[actix_web::test]
    async fn callback_rejects_bad_state(
        login_providers: LoginProviders,
        #[case] state: Option<&str>,
        #[case] code: Option<&str>,
    ) {
        let mut ports = MockPorts::default();
        ports.users.expect_upsert().never();
        let app = test::init_service(test_app_with_login(ports, login_providers)).await;
        let (cookie, _) = start_login(&app).await;

        let mut uri = "/api/v1/auth/callback?provider=fixture".to_owned();
        if let Some(state) = state {
            uri.push_str(&format!("&state={state}"));
        }
        if let Some(code) = code {
            uri.push_str(&format!("&code={code}"));
        }
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(&uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn declined_login_is_unauthorised(login_providers: LoginProviders) {
        let mut ports = MockPorts::default();
        ports.users.expect_upsert().never();
        let app = test::init_service(test_app_with_login(ports, login_providers)).await;
        let (cookie, state) = start_login(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!(
                    "/api/v1/auth/callback?provider=fixture&state={state}&error=access_denied"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn me_without_session_is_unauthorised(login_providers: LoginProviders) {
        let app = test::init_service(test_app_with_login(MockPorts::default(), login_providers))
            .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_clears_the_session(login_providers: LoginProviders) {
        let app = test::init_service(test_app_with_login(MockPorts::default(), login_providers))
            .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/auth/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
