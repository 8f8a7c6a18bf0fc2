//! Typed access to the cookie session.
//!
//! The session holds two things: the logged-in user id and, between the
//! login redirect and the provider callback, the pending [`LoginState`].
//! Library handlers take [`CurrentUser`]; login handlers take
//! [`SessionContext`].

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const LOGIN_STATE_KEY: &str = "login_state";

/// CSRF state remembered between the login redirect and the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub provider: String,
    pub state: String,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(id.and_then(|raw| parse_user_id(&raw)))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Remember the CSRF state issued for a login redirect.
    pub fn store_login_state(&self, login: &LoginState) -> Result<(), Error> {
        self.0
            .insert(LOGIN_STATE_KEY, login)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Remove and return the pending login state; it is single use.
    pub fn take_login_state(&self) -> Option<LoginState> {
        match self.0.remove_as::<LoginState>(LOGIN_STATE_KEY) {
            Some(Ok(state)) => Some(state),
            Some(Err(raw)) => {
                warn!(%raw, "discarding unreadable login state");
                None
            }
            None => None,
        }
    }

    /// Issue a fresh session key, keeping the stored values.
    pub fn renew(&self) {
        self.0.renew();
    }

    /// Drop every value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(%error, "invalid user id in session cookie");
            None
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// The user acting on a library endpoint.
///
/// Resolves to [`UserId::anonymous`] when the session holds no valid user, so
/// repositories answer `NotFound` or empty lists instead of `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl CurrentUser {
    /// The acting user's id.
    #[must_use]
    pub const fn id(self) -> UserId {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = match req.get_session().get::<String>(USER_ID_KEY) {
            Ok(Some(raw)) => parse_user_id(&raw),
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "unreadable session; treating caller as anonymous");
                None
            }
        };
        ready(Ok(Self(id.unwrap_or_else(UserId::anonymous))))
    }
}
