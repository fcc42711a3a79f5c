use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use sea_orm::prelude::Uuid;

use super::app_state;
use crate::auth::identity::Caller;
use crate::db::require_db;
use crate::error::AppError;
use crate::services::users::require_user_uuid;

/// Authenticated caller resolved to a stored user. Authentication happens
/// first; the database is only consulted for a verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_uuid: Uuid,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let caller = Caller::from_request(&req, payload);

        Box::pin(async move {
            let caller = caller.await?;
            let state = app_state(&req)?;
            let db = require_db(state)?;
            let user_uuid = require_user_uuid(db, &caller.email).await?;

            Ok(CurrentUser {
                user_uuid,
                email: caller.email,
            })
        })
    }
}
