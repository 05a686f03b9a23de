use super::helpers::{fetch_place_for_update, fetch_user_for_update, update_place, update_user};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{CreatePlaceParams, PlaceAPI, UpdatePlaceParams},
    entities::{Place, User},
    error::{
        delete_forbidden_error, edit_forbidden_error, place_not_found_error,
        user_places_not_found_error, Error,
    },
    external::geocode,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| place_not_found_error())?;
        let Json(place): Json<Place> = result.try_get("data")?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn find_places_by_user(&self, user_id: Uuid) -> Result<Vec<Place>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM users WHERE id = $1").bind(&user_id))
            .await?;

        let Json(user): Json<User> = maybe_result
            .ok_or_else(|| user_places_not_found_error())?
            .try_get("data")?;

        let results = conn
            .fetch_all(sqlx::query("SELECT data FROM places WHERE creator = $1").bind(&user_id))
            .await?;

        let mut places = Vec::with_capacity(results.len());

        for result in results.iter() {
            let Json(place): Json<Place> = result.try_get("data")?;
            places.push(place);
        }

        if places.is_empty() {
            return Err(user_places_not_found_error());
        }

        // keep the order in which the user added them
        places.sort_by_key(|place| user.places.iter().position(|id| *id == place.id));

        Ok(places)
    }

    #[tracing::instrument(skip(self))]
    async fn create_place(&self, params: CreatePlaceParams) -> Result<Place, Error> {
        let location = geocode::find_coordinates(&params.address).await?;

        let place = Place::new(
            params.title,
            params.description,
            params.address,
            location,
            params.image,
            params.creator,
        );

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut user = fetch_user_for_update(&mut tx, &place.creator).await?;

        tx.execute(
            sqlx::query("INSERT INTO places (id, creator, data) VALUES ($1, $2, $3)")
                .bind(&place.id)
                .bind(&place.creator)
                .bind(Json(&place)),
        )
        .await?;

        user.places.push(place.id);
        update_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn update_place(
        &self,
        user_id: Uuid,
        id: Uuid,
        params: UpdatePlaceParams,
    ) -> Result<Place, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut place = fetch_place_for_update(&mut tx, &id).await?;

        if place.creator != user_id {
            return Err(edit_forbidden_error());
        }

        place.title = params.title;
        place.description = params.description;

        update_place(&mut tx, &place).await?;

        tx.commit().await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_place(&self, user_id: Uuid, id: Uuid) -> Result<Place, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let place = fetch_place_for_update(&mut tx, &id).await?;

        if place.creator != user_id {
            return Err(delete_forbidden_error());
        }

        let mut user = fetch_user_for_update(&mut tx, &place.creator).await?;

        tx.execute(sqlx::query("DELETE FROM places WHERE id = $1").bind(&place.id))
            .await?;

        user.places.retain(|place_id| *place_id != place.id);
        update_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(place)
    }
}
