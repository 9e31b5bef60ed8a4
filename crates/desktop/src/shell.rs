//! Hosting shell: route table, guarded navigation and session actions.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use stockdesk_auth::{
    AccessGuard, Redirect, RenderDecision, SessionProvider, SessionStore, StoreError,
    StoredSession,
};
use stockdesk_core::DocumentId;
use stockdesk_documents::{DocumentDetail, StockDocument};
use stockdesk_observability::TracingGuardObserver;

use crate::config::ShellConfig;
use crate::navigation::{History, normalize_path};

/// Redirect chains longer than this are treated as a configuration loop.
const MAX_REDIRECTS: usize = 8;

const DOCUMENTS_PREFIX: &str = "/documents";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("redirect loop while resolving '{path}'")]
    RedirectLoop { path: String },

    #[error(transparent)]
    Session(#[from] StoreError),
}

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Documents,
    DocumentDetail(DocumentId),
    NotFound(String),
}

impl Route {
    /// Protected routes go through the access guard.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Documents | Route::DocumentDetail(_))
    }
}

/// What the rendering surface should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Login,
    DocumentList,
    DocumentDetail { id: DocumentId },
    /// Session still resolving; show a placeholder, never the protected view.
    Loading { path: String },
    NotFound { path: String },
}

/// Path → route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    login_path: String,
    home_path: String,
}

impl Routes {
    pub fn new(login_path: &str, home_path: &str) -> Self {
        Self {
            login_path: normalize_path(login_path).to_string(),
            home_path: normalize_path(home_path).to_string(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn resolve(&self, path: &str) -> Route {
        let path = normalize_path(path);

        if path == self.login_path {
            return Route::Login;
        }
        if path == self.home_path || path == DOCUMENTS_PREFIX {
            return Route::Documents;
        }
        if let Some(id) = path
            .strip_prefix(DOCUMENTS_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            if let Ok(id) = id.parse::<DocumentId>() {
                return Route::DocumentDetail(id);
            }
        }
        Route::NotFound(path.to_string())
    }
}

/// The application shell.
///
/// Owns navigation history and the current screen; every navigation step is
/// resolved through the route table and, for protected routes, the guard.
#[derive(Debug)]
pub struct Shell<P> {
    guard: AccessGuard<P>,
    routes: Routes,
    history: History,
    screen: Screen,
}

impl<P: SessionProvider> Shell<P> {
    pub fn new(provider: P, config: &ShellConfig) -> Self {
        let routes = Routes::new(&config.login_path, &config.home_path);
        let guard = AccessGuard::new(provider)
            .with_login_path(routes.login_path().to_string())
            .with_observer(Arc::new(TracingGuardObserver::new()));

        Self {
            history: History::new(routes.home_path().to_string()),
            screen: Screen::Loading {
                path: routes.home_path().to_string(),
            },
            guard,
            routes,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn guard(&self) -> &AccessGuard<P> {
        &self.guard
    }

    /// Navigate to `path`, pushing a history entry.
    pub fn navigate(&mut self, path: &str) -> Result<&Screen, ShellError> {
        tracing::debug!(path, "navigate");
        self.history.push(normalize_path(path));
        self.settle()
    }

    /// Go back one entry. At the first entry this re-renders in place.
    pub fn back(&mut self) -> Result<&Screen, ShellError> {
        self.history.back();
        self.settle()
    }

    /// Re-evaluate the current entry (e.g. after the session resolved).
    pub fn refresh(&mut self) -> Result<&Screen, ShellError> {
        self.settle()
    }

    /// Detail view model for `doc`, if it is the document currently shown.
    pub fn detail_for(&self, doc: &StockDocument) -> Option<DocumentDetail> {
        match &self.screen {
            Screen::DocumentDetail { id } if *id == doc.id => {
                Some(DocumentDetail::from_document(doc))
            }
            _ => None,
        }
    }

    fn settle(&mut self) -> Result<&Screen, ShellError> {
        for _ in 0..MAX_REDIRECTS {
            let path = self.history.current().to_string();
            match self.decide(&path) {
                RenderDecision::Render(screen) => {
                    self.screen = screen;
                    return Ok(&self.screen);
                }
                RenderDecision::Pending => {
                    self.screen = Screen::Loading { path };
                    return Ok(&self.screen);
                }
                RenderDecision::Redirect(redirect) => {
                    tracing::debug!(from = %path, to = %redirect.target, "redirect");
                    self.history.apply(&redirect);
                }
            }
        }

        let path = self.history.current().to_string();
        tracing::error!(path = %path, "redirect loop");
        Err(ShellError::RedirectLoop { path })
    }

    fn decide(&self, path: &str) -> RenderDecision<Screen> {
        match self.routes.resolve(path) {
            Route::Login => {
                if self.guard.provider().is_authenticated() {
                    RenderDecision::Redirect(Redirect::replace(self.routes.home_path.clone()))
                } else {
                    RenderDecision::Render(Screen::Login)
                }
            }
            Route::NotFound(path) => RenderDecision::Render(Screen::NotFound { path }),
            Route::Documents => self.guard.evaluate_route(path, Screen::DocumentList),
            Route::DocumentDetail(id) => {
                self.guard
                    .evaluate_route(path, Screen::DocumentDetail { id })
            }
        }
    }
}

impl<S: SessionStore> Shell<StoredSession<S>> {
    /// Store credentials and re-render; on the login page this lands on home.
    pub fn login(&mut self, access_token: &str, user_record: &str) -> Result<&Screen, ShellError> {
        self.guard.provider().login(access_token, user_record)?;
        self.settle()
    }

    /// Clear credentials and re-render; a protected page is replaced by login.
    pub fn logout(&mut self) -> Result<&Screen, ShellError> {
        self.guard.provider().logout()?;
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use stockdesk_auth::{AnonymousReason, MemorySessionStore, SessionState};

    fn config() -> ShellConfig {
        ShellConfig {
            session_file: PathBuf::from("/unused"),
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
        }
    }

    fn anonymous() -> SessionState {
        SessionState::Anonymous {
            reason: AnonymousReason::NoCredentials,
        }
    }

    #[test]
    fn routes_resolve_paths() {
        let routes = Routes::new("/login", "/");
        let id = DocumentId::new();

        assert_eq!(routes.resolve("/login"), Route::Login);
        assert_eq!(routes.resolve("/login/?next=x"), Route::Login);
        assert_eq!(routes.resolve("/"), Route::Documents);
        assert_eq!(routes.resolve("/documents/"), Route::Documents);
        assert_eq!(
            routes.resolve(&format!("/documents/{id}")),
            Route::DocumentDetail(id)
        );
        assert_eq!(
            routes.resolve("/documents/not-an-id"),
            Route::NotFound("/documents/not-an-id".to_string())
        );
        assert!(!Route::Login.is_protected());
        assert!(Route::Documents.is_protected());
    }

    #[test]
    fn trailing_slash_route_config_still_reaches_login_and_home() {
        let config = ShellConfig {
            session_file: PathBuf::from("/unused"),
            login_path: "/sign-in/".to_string(),
            home_path: "/home/".to_string(),
        };

        let mut shell = Shell::new(anonymous(), &config);
        assert_eq!(shell.navigate("/documents").unwrap(), &Screen::Login);
        assert_eq!(shell.history().current(), "/sign-in");
        assert_eq!(shell.guard().login_path(), "/sign-in");

        let mut shell = Shell::new(SessionState::Authenticated, &config);
        assert_eq!(shell.navigate("/sign-in").unwrap(), &Screen::DocumentList);
        assert_eq!(shell.history().current(), "/home");
    }

    #[test]
    fn anonymous_navigation_is_replaced_by_login() {
        let mut shell = Shell::new(anonymous(), &config());
        shell.refresh().unwrap();
        assert_eq!(shell.screen(), &Screen::Login);
        assert_eq!(shell.history().entries(), ["/login"]);

        let id = DocumentId::new();
        let screen = shell.navigate(&format!("/documents/{id}")).unwrap();
        assert_eq!(screen, &Screen::Login);
        assert!(!shell.history().contains(&format!("/documents/{id}")));
    }

    #[test]
    fn authenticated_navigation_renders_and_login_bounces_home() {
        let mut shell = Shell::new(SessionState::Authenticated, &config());
        assert_eq!(shell.refresh().unwrap(), &Screen::DocumentList);

        let id = DocumentId::new();
        assert_eq!(
            shell.navigate(&format!("/documents/{id}")).unwrap(),
            &Screen::DocumentDetail { id }
        );

        assert_eq!(shell.navigate("/login").unwrap(), &Screen::DocumentList);
        assert!(!shell.history().contains("/login"));
    }

    #[test]
    fn resolving_session_shows_loading_not_content() {
        let mut shell = Shell::new(SessionState::Resolving, &config());
        assert_eq!(
            shell.navigate("/documents").unwrap(),
            &Screen::Loading {
                path: "/documents".to_string()
            }
        );
    }

    #[test]
    fn unknown_paths_render_not_found_without_guard() {
        let mut shell = Shell::new(anonymous(), &config());
        assert_eq!(
            shell.navigate("/reports").unwrap(),
            &Screen::NotFound {
                path: "/reports".to_string()
            }
        );
    }

    #[test]
    fn login_and_logout_drive_navigation() {
        let store = MemorySessionStore::new();
        let mut shell = Shell::new(StoredSession::new(&store), &config());
        assert_eq!(shell.refresh().unwrap(), &Screen::Login);

        assert_eq!(
            shell.login("tok", r#"{"name":"ana"}"#).unwrap(),
            &Screen::DocumentList
        );
        assert_eq!(shell.history().entries(), ["/"]);

        assert_eq!(shell.logout().unwrap(), &Screen::Login);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn login_with_empty_token_is_rejected() {
        let store = MemorySessionStore::new();
        let mut shell = Shell::new(StoredSession::new(&store), &config());
        let err = shell.login("", "{}").unwrap_err();
        assert!(matches!(err, ShellError::Session(StoreError::InvalidValue { .. })));
    }

    #[test]
    fn detail_is_only_built_for_the_shown_document() {
        let mut shell = Shell::new(SessionState::Authenticated, &config());
        let doc = StockDocument::from_json(
            r#"{
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "number": "GR-1",
                "kind": "receipt",
                "status": "posted",
                "date": "2024-05-01"
            }"#,
        )
        .unwrap();

        assert_eq!(shell.detail_for(&doc), None);

        shell.navigate(&format!("/documents/{}", doc.id)).unwrap();
        let detail = shell.detail_for(&doc).unwrap();
        assert_eq!(detail.badge.label, "Posted");
    }
}
