//! HTTP Transport - Single-Endpoint JSON API
//!
//! Thin layer over the composer: parses the request envelope, invokes
//! compose, and serializes the scene to a base64 data URL. Every error
//! raised during parsing or composition maps to a plain-text 500.

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::composer::{ComposeError, CreatureComposer};
use crate::species::{Dimensions, Quality, SpeciesInput};

pub const DEFAULT_PORT: u16 = 8001;

const CORS_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Request envelope for `POST /api/generate-stitched`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub a: SpeciesInput,
    pub b: SpeciesInput,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Response envelope: inline data URL plus the effective parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image_url: String,
    pub seed: u64,
    pub quality: String,
    pub dimensions: Dimensions,
}

/// Build the service router. Stateless; safe to clone per connection.
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/generate-stitched",
            post(generate_stitched).options(preflight).fallback(fallback),
        )
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
}

/// Handle the envelope outside the handler so tests can drive it directly.
pub fn handle_generate(body: &[u8]) -> Result<GenerateResponse, ComposeError> {
    let request: GenerateRequest =
        serde_json::from_slice(body).map_err(|e| ComposeError::InvalidInput(e.to_string()))?;

    let tier = request.quality.as_deref().unwrap_or("med");
    let result = CreatureComposer::new().compose(
        &request.a,
        &request.b,
        Quality::resolve(tier),
        request.seed,
    )?;

    tracing::info!(
        a = %request.a.name,
        b = %request.b.name,
        seed = result.seed,
        "generated stitched creature"
    );

    Ok(GenerateResponse {
        image_url: result.document.to_data_url(),
        seed: result.seed,
        quality: tier.to_string(),
        dimensions: result.dimensions,
    })
}

async fn generate_stitched(body: Bytes) -> Response {
    match handle_generate(&body) {
        Ok(response) => (StatusCode::OK, CORS_HEADERS, Json(response)).into_response(),
        Err(error) => {
            tracing::error!(%error, "generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CORS_HEADERS,
                format!("Server error: {error}"),
            )
                .into_response()
        }
    }
}

/// CORS preflight: 200 with the allow headers and an empty body, any path.
async fn preflight() -> Response {
    (StatusCode::OK, CORS_HEADERS).into_response()
}

async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await
    } else {
        (StatusCode::NOT_FOUND, "Endpoint not found").into_response()
    }
}
