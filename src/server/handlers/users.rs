use axum::extract::Extension;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::{Credentials, DynAPI, SignupParams, UserAPI};
use crate::entities::{PublicUser, Session};
use crate::error::{invalid_input_error, Error};
use crate::server::extract::{Json, Multipart};
use crate::upload::{self, FormData};

#[derive(Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<PublicUser>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginParams {
    email: String,
    password: String,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<UsersResponse>, Error> {
    let users = api.list_users().await?;

    Ok(Json(UsersResponse { users }))
}

pub async fn signup(
    Extension(api): Extension<DynAPI>,
    Multipart(multipart): Multipart,
) -> Result<(StatusCode, Json<Session>), Error> {
    let form = upload::read_form(multipart).await?;

    match signup_user(&api, &form).await {
        Ok(session) => Ok((StatusCode::CREATED, Json(session))),
        Err(err) => {
            // never leave the stored image behind on a failed request
            form.discard_image().await;
            Err(err)
        }
    }
}

async fn signup_user(api: &DynAPI, form: &FormData) -> Result<Session, Error> {
    let name = form.field("name")?;
    let email = form.field("email")?;
    let password = form.field("password")?;
    let image = form.image_path()?;

    validate_signup_fields(name, email, password)?;

    api.signup(SignupParams {
        name: name.into(),
        email: email.into(),
        password: password.into(),
        image: image.into(),
    })
    .await
}

pub async fn login(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LoginParams>,
) -> Result<Json<Session>, Error> {
    let session = api
        .login(Credentials {
            email: params.email,
            password: params.password,
        })
        .await?;

    Ok(Json(session))
}

fn validate_signup_fields(name: &str, email: &str, password: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(invalid_input_error());
    }

    if !is_email(email) {
        return Err(invalid_input_error());
    }

    if password.chars().count() < 6 {
        return Err(invalid_input_error());
    }

    Ok(())
}

// one @ with a non-empty local part and a dotted domain
fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');

    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.')
    )
}

#[test]
fn validate_signup_fields_test() {
    assert!(validate_signup_fields("Michael", "michael@example.com", "hunter22").is_ok());

    // empty name
    assert!(validate_signup_fields("", "michael@example.com", "hunter22").is_err());

    // malformed email
    assert!(validate_signup_fields("Michael", "not-an-email", "hunter22").is_err());

    // password shorter than six characters
    assert!(validate_signup_fields("Michael", "michael@example.com", "12345").is_err());
    assert!(validate_signup_fields("Michael", "michael@example.com", "123456").is_ok());
}

#[test]
fn is_email_test() {
    assert!(is_email("michael@example.com"));
    assert!(is_email("a@b.co"));

    assert!(!is_email(""));
    assert!(!is_email("no-at-sign.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("michael@nodot"));
    assert!(!is_email("two@at@signs.com"));
}
