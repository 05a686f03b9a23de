use super::Database;

use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::{Place, User},
    error::{creator_not_found_error, place_not_found_error, Error},
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_place_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Place, Error> {
    let Json(place): Json<Place> = tx
        .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| place_not_found_error())?
        .try_get("data")?;

    Ok(place)
}

#[tracing::instrument(skip(tx))]
pub async fn fetch_user_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<User, Error> {
    let Json(user): Json<User> = tx
        .fetch_optional(sqlx::query("SELECT data FROM users WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| creator_not_found_error())?
        .try_get("data")?;

    Ok(user)
}

#[tracing::instrument(skip(tx))]
pub async fn update_place(tx: &mut Transaction<'_, Database>, place: &Place) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE places SET creator = $2, data = $3 WHERE id = $1")
            .bind(&place.id)
            .bind(&place.creator)
            .bind(Json(place)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn update_user(tx: &mut Transaction<'_, Database>, user: &User) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE users SET email = $2, data = $3 WHERE id = $1")
            .bind(&user.id)
            .bind(&user.email)
            .bind(Json(user)),
    )
    .await?;

    Ok(())
}
