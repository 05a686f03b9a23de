use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Place, PublicUser, Session};
use crate::error::Error;

#[derive(Clone, Debug)]
pub struct CreatePlaceParams {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: String,
    pub creator: Uuid,
}

#[derive(Clone, Debug)]
pub struct UpdatePlaceParams {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct SignupParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait PlaceAPI {
    async fn find_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn find_places_by_user(&self, user_id: Uuid) -> Result<Vec<Place>, Error>;
    async fn create_place(&self, params: CreatePlaceParams) -> Result<Place, Error>;
    async fn update_place(
        &self,
        user_id: Uuid,
        id: Uuid,
        params: UpdatePlaceParams,
    ) -> Result<Place, Error>;
    async fn delete_place(&self, user_id: Uuid, id: Uuid) -> Result<Place, Error>;
}

#[async_trait]
pub trait UserAPI {
    async fn list_users(&self) -> Result<Vec<PublicUser>, Error>;
    async fn signup(&self, params: SignupParams) -> Result<Session, Error>;
    async fn login(&self, credentials: Credentials) -> Result<Session, Error>;
}

pub trait API: PlaceAPI + UserAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
