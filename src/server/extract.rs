use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, RequestParts};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{invalid_input_error, Error};

pub const MAX_JSON_BYTES: usize = 100_000; // 100kb

// the stock extractors answer failures with plain text; these wrappers
// surface every rejection as the JSON error body instead
#[derive(Debug)]
pub struct Json<T>(pub T);

#[async_trait]
impl<T> FromRequest<Body> for Json<T>
where
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<Body>) -> Result<Self, Self::Rejection> {
        if !json_content_type(req) {
            return Err(invalid_input_error());
        }

        if declared_length(req).map_or(false, |length| length > MAX_JSON_BYTES) {
            return Err(invalid_input_error());
        }

        let bytes = Bytes::from_request(req)
            .await
            .map_err(|_| invalid_input_error())?;

        // bodies without a declared length are checked once read
        if bytes.len() > MAX_JSON_BYTES {
            return Err(invalid_input_error());
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| invalid_input_error())
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

pub struct Path<T>(pub T);

#[async_trait]
impl<T> FromRequest<Body> for Path<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<Body>) -> Result<Self, Self::Rejection> {
        let path = axum::extract::Path::from_request(req)
            .await
            .map_err(|_| invalid_input_error())?;

        Ok(Self(path.0))
    }
}

pub struct Multipart(pub axum::extract::Multipart);

#[async_trait]
impl FromRequest<Body> for Multipart {
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<Body>) -> Result<Self, Self::Rejection> {
        let multipart = axum::extract::Multipart::from_request(req)
            .await
            .map_err(|_| invalid_input_error())?;

        Ok(Self(multipart))
    }
}

fn json_content_type<B>(req: &RequestParts<B>) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("application/json"))
}

fn declared_length<B>(req: &RequestParts<B>) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

#[test]
fn json_rejects_wrong_content_type_test() {
    use axum::http::{Request, StatusCode};

    let req = Request::builder()
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"email":"michael@example.com"}"#))
        .unwrap();

    let mut parts = RequestParts::new(req);
    let err = tokio_test::block_on(Json::<serde_json::Value>::from_request(&mut parts))
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn json_rejects_declared_oversize_test() {
    use axum::http::{Request, StatusCode};

    let req = Request::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, (MAX_JSON_BYTES + 1).to_string())
        .body(Body::from("{}"))
        .unwrap();

    let mut parts = RequestParts::new(req);
    let err = tokio_test::block_on(Json::<serde_json::Value>::from_request(&mut parts))
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn json_reads_valid_body_test() {
    use axum::http::Request;

    let req = Request::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"michael@example.com"}"#))
        .unwrap();

    let mut parts = RequestParts::new(req);
    let Json(value) =
        tokio_test::block_on(Json::<serde_json::Value>::from_request(&mut parts)).unwrap();

    assert_eq!(value["email"], "michael@example.com");
}
