//! `stockdesk-auth` — client-side session evaluation and route access guard.
//!
//! This crate is intentionally decoupled from rendering and navigation: the
//! guard returns a decision and the hosting shell acts on it.
//!
//! Access here is a UX gate only. Whoever serves document data must still
//! validate the credential on every request.

pub mod guard;
pub mod session;
pub mod store;

pub use guard::{
    AccessGuard, DecisionKind, GuardEvent, GuardObserver, LOGIN_PATH, NavigationMode,
    NoopObserver, Redirect, RenderDecision,
};
pub use session::{AnonymousReason, SessionProvider, SessionState, StoredSession};
pub use store::{ACCESS_TOKEN_KEY, MemorySessionStore, SessionStore, StoreError, USER_KEY};
