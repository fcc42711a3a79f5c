use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// The database connection, or `DbUnavailable` when the app was started
/// without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("database is not configured"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use super::*;
    use crate::errors::ErrorCode;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn test_require_db_without_db() {
        let app_state = AppState::new_without_db(SecurityConfig::new("secret"));

        let err = require_db(&app_state).unwrap_err();

        assert!(matches!(err, AppError::DbUnavailable { .. }));
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
        assert_eq!(err.error_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
