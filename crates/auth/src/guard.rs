//! Route access guard.
//!
//! The guard inspects the injected session and returns a tagged decision. It
//! never navigates by itself and never writes to the session; the hosting
//! shell applies the decision.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::session::{SessionProvider, SessionState};

/// Default target for denied navigation.
pub const LOGIN_PATH: &str = "/login";

/// How a redirect is applied to navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Add a new history entry.
    Push,
    /// Overwrite the current entry; back-navigation skips the denied route.
    Replace,
}

/// Redirect instruction handed to the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: Cow<'static, str>,
    pub mode: NavigationMode,
}

impl Redirect {
    pub fn replace(target: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Replace,
        }
    }

    pub fn push(target: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Push,
        }
    }

    pub fn replaces_history(&self) -> bool {
        self.mode == NavigationMode::Replace
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision<C> {
    /// Access granted; the content is passed through untouched.
    Render(C),
    /// Access denied.
    Redirect(Redirect),
    /// Session not resolved yet; render neither the content nor a redirect.
    Pending,
}

/// Payload-free tag of a [`RenderDecision`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Render,
    Redirect,
    Pending,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Render => "render",
            DecisionKind::Redirect => "redirect",
            DecisionKind::Pending => "pending",
        }
    }
}

impl<C> RenderDecision<C> {
    pub fn kind(&self) -> DecisionKind {
        match self {
            RenderDecision::Render(_) => DecisionKind::Render,
            RenderDecision::Redirect(_) => DecisionKind::Redirect,
            RenderDecision::Pending => DecisionKind::Pending,
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, RenderDecision::Render(_))
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            RenderDecision::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn into_content(self) -> Option<C> {
        match self {
            RenderDecision::Render(content) => Some(content),
            _ => None,
        }
    }

    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> RenderDecision<D> {
        match self {
            RenderDecision::Render(content) => RenderDecision::Render(f(content)),
            RenderDecision::Redirect(redirect) => RenderDecision::Redirect(redirect),
            RenderDecision::Pending => RenderDecision::Pending,
        }
    }
}

/// What the guard reports to its observer.
///
/// Never contains credential values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardEvent<'a> {
    pub route: Option<&'a str>,
    pub decision: DecisionKind,
    pub session: SessionState,
}

/// Optional hook invoked once per evaluation.
pub trait GuardObserver: Send + Sync {
    fn on_decision(&self, event: &GuardEvent<'_>);
}

/// Observer that discards events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GuardObserver for NoopObserver {
    fn on_decision(&self, _event: &GuardEvent<'_>) {}
}

/// Gate for protected content.
///
/// Stateless apart from its configuration: evaluating repeatedly against an
/// unchanged session yields the same decision.
#[derive(Clone)]
pub struct AccessGuard<P> {
    provider: P,
    login_path: Cow<'static, str>,
    observer: Arc<dyn GuardObserver>,
}

impl<P> core::fmt::Debug for AccessGuard<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl<P: SessionProvider> AccessGuard<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            login_path: Cow::Borrowed(LOGIN_PATH),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Redirect denied navigation somewhere other than [`LOGIN_PATH`].
    pub fn with_login_path(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn GuardObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Decide whether `content` may render.
    pub fn evaluate<C>(&self, content: C) -> RenderDecision<C> {
        self.decide(None, content)
    }

    /// Same as [`AccessGuard::evaluate`], tagging the observer event with the
    /// route being entered.
    pub fn evaluate_route<C>(&self, route: &str, content: C) -> RenderDecision<C> {
        self.decide(Some(route), content)
    }

    fn decide<C>(&self, route: Option<&str>, content: C) -> RenderDecision<C> {
        let session = self.provider.session_state();

        let decision = match session {
            SessionState::Authenticated => RenderDecision::Render(content),
            SessionState::Anonymous { .. } => {
                RenderDecision::Redirect(Redirect::replace(self.login_path.clone()))
            }
            SessionState::Resolving => RenderDecision::Pending,
        };

        self.observer.on_decision(&GuardEvent {
            route,
            decision: decision.kind(),
            session,
        });

        decision
    }
}
