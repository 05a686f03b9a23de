mod extract;
mod handlers;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    handler::Handler,
    http::{header, HeaderName, Method},
    routing::{get, get_service, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api::{DynAPI, API};
use crate::error::{route_not_found_error, Error};
use crate::server::handlers::{places, users};
use crate::upload;

pub fn app(api: DynAPI) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(vec![
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ]);

    Router::new()
        .route("/api/places/user/:user_id", get(places::find_by_user))
        .route(
            "/api/places/:place_id",
            get(places::find)
                .patch(places::update)
                .delete(places::remove),
        )
        .route("/api/places", post(places::create))
        .route("/api/users", get(users::list))
        .route("/api/users/signup", post(users::signup))
        .route("/api/users/login", post(users::login))
        .nest(
            "/uploads/images",
            get_service(ServeDir::new(upload::image_dir())).handle_error(handle_static_error),
        )
        .fallback(route_not_found.into_service())
        .layer(Extension(api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    if let Err(err) = tokio::fs::create_dir_all(upload::image_dir()).await {
        tracing::warn!("failed to create upload directory: {:?}", err);
    }

    let app = app(api);

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(5000);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn route_not_found() -> Error {
    route_not_found_error()
}

async fn handle_static_error(err: std::io::Error) -> Error {
    err.into()
}
