use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::claims::IdentityProfile;
use crate::entities::users;

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_uuid_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Uuid>, DbErr> {
    users::Entity::find()
        .select_only()
        .column(users::Column::UserUuid)
        .filter(users::Column::Email.eq(email))
        .into_tuple::<Uuid>()
        .one(conn)
        .await
}

/// Insert the user unless the email already exists. Existing rows are left
/// untouched. Returns the stored row and whether it was created here.
pub async fn ensure_user<C: ConnectionTrait>(
    conn: &C,
    profile: &IdentityProfile,
) -> Result<(users::Model, bool), DbErr> {
    let active = users::ActiveModel {
        user_uuid: Set(Uuid::new_v4()),
        email: Set(profile.email.clone()),
        name: Set(profile.name.clone()),
        picture: Set(profile.picture.clone()),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    let rows = users::Entity::insert(active)
        .on_conflict(
            OnConflict::column(users::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    let user = find_by_email(conn, &profile.email)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("users.email {}", profile.email)))?;

    Ok((user, rows == 1))
}
