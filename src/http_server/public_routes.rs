//! Public Routes
//!
//! Health check and the contact form.

use axum::{http::StatusCode, response::IntoResponse, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Contact form submission
#[derive(Debug, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Contact form route
pub fn contact_routes() -> Router {
    Router::new().route("/contact", post(contact_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn contact_handler(Json(contact): Json<ContactMessage>) -> Json<ContactResponse> {
    info!(
        name = %contact.name,
        email = %contact.email,
        length = contact.message.len(),
        "contact form submitted"
    );

    Json(ContactResponse {
        message: "Thank you for contacting us! We will get back to you shortly.".to_string(),
    })
}
