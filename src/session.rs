use crate::{endpoints, token_store::TokenStore};
use reqwest::Client;
use url::Url;

/// An authenticated user session.
///
/// The `user` half is only ever populated from a server response, so holding
/// a [`Session`] means the token it carries was accepted by the server at
/// least once.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Session {
    /// The bearer token sent with privileged requests.
    pub token: String,
    pub user: User,
}

/// Who the server says the current token belongs to.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct User {
    pub username: String,
    pub role: Role,
}

/// The user's role as reported by the server.
///
/// Only teachers get mutation controls; every other role string the server
/// may invent collapses to [`Role::Other`] rather than failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Teacher,
    Other,
}

impl Role {
    pub fn is_teacher(self) -> bool { self == Role::Teacher }
}

impl<'a> From<&'a str> for Role {
    fn from(other: &'a str) -> Role {
        if other == "teacher" {
            Role::Teacher
        } else {
            Role::Other
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Other => write!(f, "other"),
        }
    }
}

/// Owns the current [`Session`] and the persisted token behind it.
///
/// All session mutations go through here so the in-memory state and the
/// on-disk token can never disagree for long. After every mutation the
/// caller is expected to refresh the auth display and re-fetch the activity
/// list, keeping the two in lockstep.
#[derive(Debug)]
pub struct SessionManager {
    store: TokenStore,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(store: TokenStore) -> SessionManager {
        SessionManager {
            store,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> { self.session.as_ref() }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_teacher(&self) -> bool {
        self.current_user()
            .map(|user| user.role.is_teacher())
            .unwrap_or(false)
    }

    /// Pick up a previously persisted token and validate it against the
    /// server.
    ///
    /// Always completes: with no stored token this is a no-op, and any
    /// rejection or transport failure clears both the session and the
    /// persisted token, leaving us cleanly logged out.
    pub async fn restore(&mut self, client: &Client, base: &Url) {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                log::debug!("Unable to read the stored token: {}", e);
                return;
            },
        };

        match endpoints::me(client, base, &token).await {
            Ok(user) => {
                log::info!("Restored the session for {}", user.username);
                self.session = Some(Session { token, user });
            },
            Err(e) => {
                log::warn!("Auth check failed: {}", e);
                self.clear();
            },
        }
    }

    /// Authenticate with the server and start a new session.
    ///
    /// On success the token is persisted so the session survives the next
    /// run. A failed persist is logged rather than treated as a login
    /// failure, since the in-memory session is still perfectly usable.
    pub async fn login(
        &mut self,
        client: &Client,
        base: &Url,
        username: &str,
        password: &str,
    ) -> Result<User, endpoints::LoginError> {
        let session = endpoints::login(client, base, username, password).await?;

        if let Err(e) = self.store.save(&session.token) {
            log::warn!("Unable to persist the token: {}", e);
        }

        let user = session.user.clone();
        self.session = Some(session);
        Ok(user)
    }

    /// Drop the session and the persisted token. Purely local, no server
    /// call.
    pub fn logout(&mut self) { self.clear(); }

    #[cfg(test)]
    pub(crate) fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    fn clear(&mut self) {
        self.session = None;
        if let Err(e) = self.store.clear() {
            log::warn!("Unable to remove the stored token: {}", e);
        }
    }
}
