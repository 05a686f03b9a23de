mod helpers;
mod place_api;
mod user_api;

use sqlx::{Executor, Pool, Postgres};

use crate::{api::API, error::Error};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // the email column backs the unique index checked at signup
        pool.execute(
            "CREATE TABLE IF NOT EXISTS users (id UUID PRIMARY KEY, email VARCHAR NOT NULL UNIQUE, data JSONB NOT NULL)",
        )
        .await?;

        pool.execute(
            "CREATE TABLE IF NOT EXISTS places (id UUID PRIMARY KEY, creator UUID NOT NULL REFERENCES users (id), data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self { pool })
    }
}

impl API for Engine {}
