use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};
use axum::http::header;
use uuid::Uuid;

use crate::auth::token;
use crate::error::{authentication_error, Error};

// the verified caller behind protected routes
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<B> FromRequest<B> for AuthUser
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| authentication_error())?;

        // Authorization: 'Bearer TOKEN'
        let token = header
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| authentication_error())?;

        let claims = token::verify(token)?;

        Ok(Self { id: claims.sub })
    }
}

#[test]
fn bearer_token_extraction_test() {
    use axum::http::Request;

    std::env::set_var("JWT_KEY", "test_signing_key");

    let id = Uuid::new_v4();
    let jwt = token::sign(id, "michael@example.com").unwrap();

    let req = Request::builder()
        .header("Authorization", format!("Bearer {}", jwt))
        .body(())
        .unwrap();

    let mut parts = RequestParts::new(req);
    let user = tokio_test::block_on(AuthUser::from_request(&mut parts)).unwrap();

    assert_eq!(user.id, id);
}

#[test]
fn missing_authorization_header_test() {
    use axum::http::{Request, StatusCode};

    std::env::set_var("JWT_KEY", "test_signing_key");

    let req = Request::builder().body(()).unwrap();

    let mut parts = RequestParts::new(req);
    let err = tokio_test::block_on(AuthUser::from_request(&mut parts)).unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(err.message, "Authentication failed.");
}

#[test]
fn malformed_authorization_header_test() {
    use axum::http::{Request, StatusCode};

    std::env::set_var("JWT_KEY", "test_signing_key");

    // scheme present but no token after it
    let req = Request::builder()
        .header("Authorization", "Bearer")
        .body(())
        .unwrap();

    let mut parts = RequestParts::new(req);
    let err = tokio_test::block_on(AuthUser::from_request(&mut parts)).unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
}
