use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::{Credentials, SignupParams, UserAPI},
    auth::token,
    entities::{PublicUser, Session, User},
    error::{
        credential_check_error, duplicate_email_error, hash_error, invalid_credentials_error,
        Error,
    },
};

// fixed by the password contract, new hashes always use this work factor
const BCRYPT_COST: u32 = 12;

#[async_trait]
impl UserAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<PublicUser>, Error> {
        let mut conn = self.pool.acquire().await?;

        let results = conn.fetch_all(sqlx::query("SELECT data FROM users")).await?;

        let mut users = Vec::with_capacity(results.len());

        for result in results.iter() {
            let Json(user): Json<User> = result.try_get("data")?;
            users.push(user.into());
        }

        Ok(users)
    }

    #[tracing::instrument(skip(self, params))]
    async fn signup(&self, params: SignupParams) -> Result<Session, Error> {
        let SignupParams {
            name,
            email,
            password,
            image,
        } = params;

        let mut conn = self.pool.acquire().await?;

        let existing = conn
            .fetch_optional(sqlx::query("SELECT id FROM users WHERE email = $1").bind(&email))
            .await?;

        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
            .await
            .map_err(|err| hash_error(err))?
            .map_err(|err| hash_error(err))?;

        let user = User::new(name, email, hashed, image);

        conn.execute(
            sqlx::query("INSERT INTO users (id, email, data) VALUES ($1, $2, $3)")
                .bind(&user.id)
                .bind(&user.email)
                .bind(Json(&user)),
        )
        .await
        .map_err(|err| match &err {
            // a concurrent signup with the same email trips the unique index
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                duplicate_email_error()
            }
            _ => err.into(),
        })?;

        let token = token::sign(user.id, &user.email)?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            token,
        })
    }

    #[tracing::instrument(skip(self, credentials))]
    async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(
                sqlx::query("SELECT data FROM users WHERE email = $1").bind(&credentials.email),
            )
            .await?;

        // an unknown email reads the same as a wrong password
        let result = maybe_result.ok_or_else(|| invalid_credentials_error())?;
        let Json(user): Json<User> = result.try_get("data")?;

        let password = credentials.password;
        let hash = user.password.clone();

        let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|err| credential_check_error(err))?
            .map_err(|err| credential_check_error(err))?;

        if !is_valid {
            return Err(invalid_credentials_error());
        }

        let token = token::sign(user.id, &user.email)?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            token,
        })
    }
}
