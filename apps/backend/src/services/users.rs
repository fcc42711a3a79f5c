use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::claims::IdentityProfile;
use crate::entities::users;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users as users_repo;

/// Record a federated login: insert the user if the email is new, otherwise
/// leave the stored row as it is.
pub async fn ensure_user(
    db: &DatabaseConnection,
    profile: &IdentityProfile,
) -> Result<users::Model, AppError> {
    let txn = db.begin().await?;
    let (user, created) = users_repo::ensure_user(&txn, profile).await?;
    txn.commit().await?;

    if created {
        info!(
            user_uuid = %user.user_uuid,
            email = %Redacted(&user.email),
            "user created on first login"
        );
    } else {
        debug!(user_uuid = %user.user_uuid, "existing user logged in");
    }
    Ok(user)
}

/// Map an authenticated email to its stored user id.
pub async fn require_user_uuid<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Uuid, AppError> {
    users_repo::find_uuid_by_email(conn, email)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "user not found"))
}
