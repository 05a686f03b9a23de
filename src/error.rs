use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub status: StatusCode,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        io_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "One or more of your inputs was invalid. Please try again.".into(),
    }
}

pub fn place_not_found_error() -> Error {
    Error {
        status: StatusCode::NOT_FOUND,
        message: "There are no places associated with the provided id.".into(),
    }
}

pub fn user_places_not_found_error() -> Error {
    Error {
        status: StatusCode::NOT_FOUND,
        message: "There are no places associated with the provided user id.".into(),
    }
}

pub fn creator_not_found_error() -> Error {
    Error {
        status: StatusCode::NOT_FOUND,
        message: "No user associated with the provided id.".into(),
    }
}

pub fn route_not_found_error() -> Error {
    Error {
        status: StatusCode::NOT_FOUND,
        message: "Could not find this route.".into(),
    }
}

pub fn edit_forbidden_error() -> Error {
    Error {
        status: StatusCode::UNAUTHORIZED,
        message: "You are not authorized to edit this place.".into(),
    }
}

pub fn delete_forbidden_error() -> Error {
    Error {
        status: StatusCode::UNAUTHORIZED,
        message: "You are not authorized to delete this place.".into(),
    }
}

pub fn authentication_error() -> Error {
    Error {
        status: StatusCode::FORBIDDEN,
        message: "Authentication failed.".into(),
    }
}

pub fn invalid_credentials_error() -> Error {
    Error {
        status: StatusCode::FORBIDDEN,
        message: "Invalid user name or password. Please ensure the information you provided is correct."
            .into(),
    }
}

pub fn duplicate_email_error() -> Error {
    Error {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "This email is already associated with an existing account. Please sign in with this account, or use a different email to sign up."
            .into(),
    }
}

pub fn no_location_error() -> Error {
    Error {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "No location found for the given address.".into(),
    }
}

pub fn invalid_image_error() -> Error {
    Error {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "Invalid mime type!".into(),
    }
}

pub fn image_too_large_error() -> Error {
    Error {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "File too large".into(),
    }
}

pub fn hash_error<T: Debug>(err: T) -> Error {
    tracing::error!("password hashing error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not create user, please try again".into(),
    }
}

pub fn credential_check_error<T: Debug>(err: T) -> Error {
    tracing::error!("password verification error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not complete log in. Please ensure the information you provided is correct."
            .into(),
    }
}

pub fn token_error<T: Debug>(err: T) -> Error {
    tracing::error!("token signing error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not log you in, please try again".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    tracing::error!("environment variable error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "An unknown error occurred.".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Something went wrong, please try again later.".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::error!("geocoding request error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "An unknown error occurred.".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "An unknown error occurred.".into(),
    }
}

pub fn io_error(err: std::io::Error) -> Error {
    tracing::error!("file storage error: {:?}", err);

    Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: "An unknown error occurred.".into(),
    }
}

#[test]
fn error_response_shape_test() {
    let response = place_not_found_error().into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = authentication_error().into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = invalid_input_error().into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = edit_forbidden_error().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
