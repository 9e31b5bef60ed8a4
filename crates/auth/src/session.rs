//! Session state derived from persisted credentials.
//!
//! A session is authenticated iff both a non-empty credential token and a
//! non-empty user record are present. Everything else, including storage
//! failures and malformed records, is anonymous.

use serde::Serialize;

use crate::store::{ACCESS_TOKEN_KEY, SessionStore, StoreError, USER_KEY};

/// Why a session is not authenticated.
///
/// Carries no credential material so it is safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousReason {
    NoCredentials,
    MissingToken,
    MissingUser,
    MalformedUser,
    StorageUnreadable,
}

impl AnonymousReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnonymousReason::NoCredentials => "no_credentials",
            AnonymousReason::MissingToken => "missing_token",
            AnonymousReason::MissingUser => "missing_user",
            AnonymousReason::MalformedUser => "malformed_user",
            AnonymousReason::StorageUnreadable => "storage_unreadable",
        }
    }
}

/// Snapshot of the session as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Authenticated,
    Anonymous { reason: AnonymousReason },
    /// The collaborator has not resolved the session yet.
    Resolving,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

/// Read-only session capability injected into the guard.
pub trait SessionProvider {
    fn session_state(&self) -> SessionState;

    fn is_authenticated(&self) -> bool {
        self.session_state().is_authenticated()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for &P {
    fn session_state(&self) -> SessionState {
        (**self).session_state()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for std::sync::Arc<P> {
    fn session_state(&self) -> SessionState {
        (**self).session_state()
    }
}

/// A fixed state is its own provider (handy for shells that resolve the
/// session elsewhere and for tests).
impl SessionProvider for SessionState {
    fn session_state(&self) -> SessionState {
        *self
    }
}

/// Session provider backed by a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct StoredSession<S> {
    store: S,
}

impl<S: SessionStore> StoredSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist both credential keys.
    ///
    /// The user record is written first so a crash between the two writes
    /// leaves a session without a token, which reads as anonymous.
    pub fn login(&self, access_token: &str, user_record: &str) -> Result<(), StoreError> {
        if !value_present(Some(access_token)) {
            return Err(StoreError::InvalidValue {
                key: ACCESS_TOKEN_KEY.to_string(),
            });
        }
        if !value_present(Some(user_record)) || user_record_malformed(user_record) {
            return Err(StoreError::InvalidValue {
                key: USER_KEY.to_string(),
            });
        }

        self.store.set(USER_KEY, user_record)?;
        self.store.set(ACCESS_TOKEN_KEY, access_token)?;
        tracing::info!("session credentials stored");
        Ok(())
    }

    /// Remove both credential keys. Removing absent keys is not an error.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        tracing::info!("session credentials cleared");
        Ok(())
    }

    fn read_state(&self) -> Result<SessionState, StoreError> {
        let token = self.store.get(ACCESS_TOKEN_KEY)?;
        let user = self.store.get(USER_KEY)?;

        let token_present = value_present(token.as_deref());
        let user_present = value_present(user.as_deref());

        let state = match (token_present, user_present) {
            (false, false) => SessionState::Anonymous {
                reason: AnonymousReason::NoCredentials,
            },
            (false, true) => SessionState::Anonymous {
                reason: AnonymousReason::MissingToken,
            },
            (true, false) => SessionState::Anonymous {
                reason: AnonymousReason::MissingUser,
            },
            (true, true) => match user.as_deref() {
                Some(record) if user_record_malformed(record) => SessionState::Anonymous {
                    reason: AnonymousReason::MalformedUser,
                },
                _ => SessionState::Authenticated,
            },
        };
        Ok(state)
    }
}

impl<S: SessionStore> SessionProvider for StoredSession<S> {
    fn session_state(&self) -> SessionState {
        match self.read_state() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "session storage unreadable; treating as anonymous");
                SessionState::Anonymous {
                    reason: AnonymousReason::StorageUnreadable,
                }
            }
        }
    }
}

/// Client storage frequently ends up holding the literal strings `null` or
/// `undefined` after a bad serialization; those count as absent.
fn value_present(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("null") | Some("undefined") => false,
        Some(_) => true,
    }
}

/// A record that looks like JSON must be a JSON object.
fn user_record_malformed(record: &str) -> bool {
    let record = record.trim();
    if !record.starts_with('{') {
        return false;
    }
    !matches!(
        serde_json::from_str::<serde_json::Value>(record),
        Ok(serde_json::Value::Object(_))
    )
}
