use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, no_location_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    results: Option<Vec<GeocodeResult>>,
}

#[tracing::instrument]
pub async fn find_coordinates(address: &str) -> Result<Coordinates, Error> {
    if address.trim().is_empty() {
        return Err(no_location_error());
    }

    let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
    let url = format!("https://{}/maps/api/geocode/json", api_base);
    let key = env::var("GOOGLE_MAPS_API_KEY")?;

    let res = reqwest::Client::new()
        .get(url)
        .query(&[("address", address)])
        .query(&[("key", key.as_str())])
        .send()
        .await?;

    let status_code = res.status().as_u16();

    if status_code >= 400 && status_code < 500 {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    let data: Response = res.json().await?;

    extract_coordinates(data)
}

fn extract_coordinates(data: Response) -> Result<Coordinates, Error> {
    if data.status == "ZERO_RESULTS" {
        return Err(no_location_error());
    }

    if data.status != "OK" {
        return Err(upstream_error());
    }

    let results = data.results.ok_or_else(|| upstream_error())?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| no_location_error())?;

    Ok(first.geometry.location)
}

#[test]
fn extract_coordinates_test() {
    let data = Response {
        status: "OK".into(),
        results: Some(vec![GeocodeResult {
            geometry: Geometry {
                location: Coordinates {
                    lat: 40.7484405,
                    lng: -73.9878531,
                },
            },
        }]),
    };

    let coordinates = extract_coordinates(data).unwrap();

    assert_eq!(coordinates.lat, 40.7484405);
    assert_eq!(coordinates.lng, -73.9878531);
}

#[test]
fn zero_results_test() {
    use axum::http::StatusCode;

    let data = Response {
        status: "ZERO_RESULTS".into(),
        results: Some(vec![]),
    };

    let err = extract_coordinates(data).unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "No location found for the given address.");
}

#[test]
fn empty_results_test() {
    use axum::http::StatusCode;

    let data = Response {
        status: "OK".into(),
        results: Some(vec![]),
    };

    let err = extract_coordinates(data).unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn upstream_status_test() {
    use axum::http::StatusCode;

    let data = Response {
        status: "REQUEST_DENIED".into(),
        results: None,
    };

    let err = extract_coordinates(data).unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn blank_address_test() {
    use axum::http::StatusCode;

    // rejected before any env or network access
    let err = tokio_test::block_on(find_coordinates("   ")).unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "No location found for the given address.");
}
