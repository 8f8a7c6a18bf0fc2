//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use super::api_routes;
use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};
use super::validation::{json_error_handler, query_error_handler};
use crate::domain::ports::{
    MockGameRepository, MockNoteRepository, MockPlatformRepository, MockPlaythroughRepository,
    MockUserRepository,
};
use crate::domain::{Error, LoginProviders, UserId};

pub const SESSION_COOKIE: &str = "session";
pub const TEST_LOGIN_PATH: &str = "/test-login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

/// Mocked repositories, configured per test before building [`HttpState`].
#[derive(Default)]
pub struct MockPorts {
    pub platforms: MockPlatformRepository,
    pub games: MockGameRepository,
    pub playthroughs: MockPlaythroughRepository,
    pub notes: MockNoteRepository,
    pub users: MockUserRepository,
}

impl MockPorts {
    /// Freeze the expectations into handler state.
    pub fn into_state(self, login: LoginProviders) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            platforms: Arc::new(self.platforms),
            games: Arc::new(self.games),
            playthroughs: Arc::new(self.playthroughs),
            notes: Arc::new(self.notes),
            users: Arc::new(self.users),
        };
        web::Data::new(HttpState::new(ports, login))
    }
}

/// Route persisting the user id given in the request path, standing in for a
/// completed login.
pub fn test_login_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        &format!("{TEST_LOGIN_PATH}/{{id}}"),
        web::get().to(
            |session: SessionContext, path: web::Path<UserId>| async move {
                session.persist_user(path.into_inner())?;
                Ok::<_, Error>(HttpResponse::NoContent().finish())
            },
        ),
    );
}

/// Log `user` in through [`test_login_route`] and return the session cookie.
pub async fn login_cookie<S>(app: &S, user: UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get()
        .uri(&format!("{TEST_LOGIN_PATH}/{user}"))
        .to_request();
    let res = test::call_service(app, req).await;
    session_cookie(&res)
}

/// Application exposing every `/api/v1` route over mocked repositories.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_login(ports, LoginProviders::default())
}

/// Like [`test_app`] with the given login providers enabled.
pub fn test_app_with_login(
    ports: MockPorts,
    login: LoginProviders,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(ports.into_state(login))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .configure(test_login_route)
        .service(web::scope("/api/v1").configure(api_routes))
}
