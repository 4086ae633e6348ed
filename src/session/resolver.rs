//! Resolve the session of an inbound request, creating one when needed.

use crate::cookie::{CookieJar, SessionCookie};
use crate::session::store::{Session, SessionId, SessionStore};

/// How the session of a request was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request presented a known session id.
    Resolved,
    /// A new session was minted; the directive must be sent to the client.
    Created { set_cookie: String },
}

/// Session attached to one request.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub id: SessionId,
    pub session: Session,
    pub resolution: Resolution,
}

impl ResolvedSession {
    /// The session `Set-Cookie` directive, if the session was just created.
    pub fn set_cookie(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Created { set_cookie } => Some(set_cookie.as_str()),
            Resolution::Resolved => None,
        }
    }
}

/// Looks up or creates sessions keyed by this relay's session cookie.
#[derive(Clone)]
pub struct SessionResolver {
    store: SessionStore,
    cookie: SessionCookie,
}

impl SessionResolver {
    pub fn new(store: SessionStore, cookie: SessionCookie) -> Self {
        Self { store, cookie }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    /// Resolve the session named by the jar, or create a new one.
    ///
    /// Missing headers, missing cookies and unknown ids all end in creation.
    pub fn resolve(&self, jar: Option<&CookieJar>) -> ResolvedSession {
        let existing = jar
            .and_then(|jar| jar.first(self.cookie.name()))
            .and_then(|id| {
                let found = self.store.resolve(id);
                if found.is_none() {
                    tracing::debug!(session_id = %id, "Unknown session id, creating a new session");
                }
                found
            });

        match existing {
            Some((id, session)) => ResolvedSession {
                id,
                session,
                resolution: Resolution::Resolved,
            },
            None => {
                let (id, session) = self.store.create();
                let set_cookie = self.cookie.set_cookie(id.as_str());
                ResolvedSession {
                    id,
                    session,
                    resolution: Resolution::Created { set_cookie },
                }
            }
        }
    }
}
