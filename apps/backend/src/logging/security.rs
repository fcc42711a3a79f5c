use tracing::warn;

use crate::auth::error::AuthError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A request failed authentication before reaching its handler.
pub fn auth_rejected(err: &AuthError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        path,
        reason = %Redacted(&err.to_string()),
        "Authentication failure"
    );
}

/// An authenticated caller tried to mutate a resource it does not own.
pub fn ownership_denied(email: &str, resource: &str, id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_OWNERSHIP_DENIED",
        %trace_id,
        email = %Redacted(email),
        resource,
        id,
        "Ownership check failed"
    );
}

/// A third-party identity token was rejected at login.
pub fn federation_failed(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        reason = %Redacted(reason),
        "Federated login failure"
    );
}
