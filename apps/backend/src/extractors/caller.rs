use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use super::app_state;
use crate::auth::identity::{resolve_caller, Caller};
use crate::error::AppError;
use crate::logging::security;

/// Bearer-token authentication. Runs before any handler body and never
/// touches the database, so a request without credentials is rejected even
/// when storage is down or absent.
impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<Caller, AppError> {
    let state = app_state(req)?;

    resolve_caller(req.headers(), &state.security).map_err(|err| {
        security::auth_rejected(&err, req.path());
        AppError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test::TestRequest;
    use actix_web::web;

    use super::*;
    use crate::auth::claims::IdentityProfile;
    use crate::auth::error::AuthError;
    use crate::auth::jwt::mint_access_token;
    use crate::state::app_state::AppState;
    use crate::state::security_config::SecurityConfig;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new_without_db(SecurityConfig::new("extractor-secret")))
    }

    #[actix_web::test]
    async fn test_missing_header_is_missing_credential() {
        let req = TestRequest::default().app_data(state()).to_http_request();

        let err = Caller::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Auth(AuthError::MissingCredential)));
    }

    #[actix_web::test]
    async fn test_valid_token_resolves_email() {
        let state = state();
        let token = mint_access_token(
            &IdentityProfile::new("owner@example.com"),
            SystemTime::now(),
            &state.security,
        )
        .unwrap();
        let req = TestRequest::default()
            .app_data(state)
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let caller = Caller::extract(&req).await.unwrap();

        assert_eq!(caller.email, "owner@example.com");
        assert_eq!(caller.token, token);
    }

    #[actix_web::test]
    async fn test_expired_token_keeps_its_kind() {
        let state = state();
        let issued = SystemTime::now() - Duration::from_secs(7200);
        let token =
            mint_access_token(&IdentityProfile::new("a@x.com"), issued, &state.security).unwrap();
        let req = TestRequest::default()
            .app_data(state)
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let err = Caller::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Auth(AuthError::ExpiredCredential)));
    }

    #[actix_web::test]
    async fn test_missing_app_state_is_internal() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer whatever"))
            .to_http_request();

        let err = Caller::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }
}
