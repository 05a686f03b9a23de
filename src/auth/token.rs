use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::error::{authentication_error, token_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

// tokens are valid for one hour from issue
pub fn sign(user_id: Uuid, email: &str) -> Result<String, Error> {
    let key = env::var("JWT_KEY")?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id,
        email: email.into(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .map_err(|err| token_error(err))
}

pub fn verify(token: &str) -> Result<Claims, Error> {
    let key = env::var("JWT_KEY")?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| authentication_error())
}

#[test]
fn sign_and_verify_token_test() {
    std::env::set_var("JWT_KEY", "test_signing_key");

    let id = Uuid::new_v4();
    let token = sign(id, "michael@example.com").unwrap();
    let claims = verify(&token).unwrap();

    assert_eq!(claims.sub, id);
    assert_eq!(claims.email, "michael@example.com");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn expired_token_test() {
    use axum::http::StatusCode;

    std::env::set_var("JWT_KEY", "test_signing_key");

    // well past the decoder's default leeway
    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "michael@example.com".into(),
        iat: (now - Duration::hours(2)).timestamp(),
        exp: (now - Duration::hours(1)).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_signing_key".as_bytes()),
    )
    .unwrap();

    let err = verify(&token).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn tampered_token_test() {
    use axum::http::StatusCode;

    std::env::set_var("JWT_KEY", "test_signing_key");

    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "michael@example.com".into(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    // signed with a different secret than the one the decoder uses
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("some_other_key".as_bytes()),
    )
    .unwrap();

    let err = verify(&token).unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);

    let err = verify("not.a.token").unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}
