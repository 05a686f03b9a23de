use axum::extract::Extension;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{CreatePlaceParams, DynAPI, PlaceAPI, UpdatePlaceParams};
use crate::auth::AuthUser;
use crate::entities::Place;
use crate::error::{invalid_input_error, Error};
use crate::server::extract::{Json, Multipart, Path};
use crate::upload::{self, FormData};

#[derive(Serialize, Deserialize)]
pub struct PlaceResponse {
    pub place: Place,
}

#[derive(Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateParams {
    title: String,
    description: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<PlaceResponse>, Error> {
    let place = api.find_place(place_id).await?;

    Ok(Json(PlaceResponse { place }))
}

pub async fn find_by_user(
    Extension(api): Extension<DynAPI>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PlacesResponse>, Error> {
    let places = api.find_places_by_user(user_id).await?;

    Ok(Json(PlacesResponse { places }))
}

pub async fn create(
    user: AuthUser,
    Extension(api): Extension<DynAPI>,
    Multipart(multipart): Multipart,
) -> Result<(StatusCode, Json<PlaceResponse>), Error> {
    let form = upload::read_form(multipart).await?;

    match create_place(&api, user, &form).await {
        Ok(place) => Ok((StatusCode::CREATED, Json(PlaceResponse { place }))),
        Err(err) => {
            // never leave the stored image behind on a failed request
            form.discard_image().await;
            Err(err)
        }
    }
}

async fn create_place(api: &DynAPI, user: AuthUser, form: &FormData) -> Result<Place, Error> {
    let title = form.field("title")?;
    let description = form.field("description")?;
    let address = form.field("address")?;
    let image = form.image_path()?;

    validate_place_fields(title, description)?;

    if address.is_empty() {
        return Err(invalid_input_error());
    }

    api.create_place(CreatePlaceParams {
        title: title.into(),
        description: description.into(),
        address: address.into(),
        image: image.into(),
        creator: user.id,
    })
    .await
}

pub async fn update(
    user: AuthUser,
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<Uuid>,
    Json(params): Json<UpdateParams>,
) -> Result<Json<PlaceResponse>, Error> {
    validate_place_fields(&params.title, &params.description)?;

    let place = api
        .update_place(
            user.id,
            place_id,
            UpdatePlaceParams {
                title: params.title,
                description: params.description,
            },
        )
        .await?;

    Ok(Json(PlaceResponse { place }))
}

pub async fn remove(
    user: AuthUser,
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, Error> {
    let place = api.delete_place(user.id, place_id).await?;

    upload::remove_stored(&place.image).await;

    Ok(Json(MessageResponse {
        message: "Place Deleted.".into(),
    }))
}

fn validate_place_fields(title: &str, description: &str) -> Result<(), Error> {
    if title.is_empty() {
        return Err(invalid_input_error());
    }

    if description.chars().count() < 5 {
        return Err(invalid_input_error());
    }

    Ok(())
}

#[test]
fn validate_place_fields_test() {
    assert!(validate_place_fields("Empire State Building", "A very famous skyscraper").is_ok());

    // empty title
    assert!(validate_place_fields("", "A very famous skyscraper").is_err());

    // description shorter than five characters
    assert!(validate_place_fields("Empire State Building", "tiny").is_err());
    assert!(validate_place_fields("Empire State Building", "").is_err());

    // five characters exactly is allowed
    assert!(validate_place_fields("Empire State Building", "12345").is_ok());
}
