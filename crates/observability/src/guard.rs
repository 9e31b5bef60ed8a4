//! Structured logging of access guard decisions.

use stockdesk_auth::{DecisionKind, GuardEvent, GuardObserver, SessionState};

/// Emits one `tracing` event per guard evaluation.
///
/// Only the route, the decision and the anonymity reason are recorded;
/// credential values never reach the observer in the first place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingGuardObserver;

impl TracingGuardObserver {
    pub fn new() -> Self {
        Self
    }
}

/// `reason` field value for an event.
pub fn session_reason(state: &SessionState) -> &'static str {
    match state {
        SessionState::Authenticated => "authenticated",
        SessionState::Anonymous { reason } => reason.as_str(),
        SessionState::Resolving => "resolving",
    }
}

impl GuardObserver for TracingGuardObserver {
    fn on_decision(&self, event: &GuardEvent<'_>) {
        let route = event.route.unwrap_or("-");
        let reason = session_reason(&event.session);

        match event.decision {
            DecisionKind::Render => {
                ::tracing::debug!(route, decision = "render", reason, "access granted");
            }
            DecisionKind::Redirect => {
                ::tracing::info!(route, decision = "redirect", reason, "access denied");
            }
            DecisionKind::Pending => {
                ::tracing::debug!(route, decision = "pending", reason, "session not resolved");
            }
        }
    }
}
