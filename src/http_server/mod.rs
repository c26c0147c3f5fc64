//! # HTTP Server Module
//!
//! JSON API over the account, questionnaire and plan services.
//!
//! # Endpoints
//!
//! - `/health`, `/contact` - public
//! - `/auth/*` - registration, login, sessions, password change
//! - `/questionnaire/*` - the three wizard steps
//! - `/plan/summary`, `/plans`, `/plans/:index` - generated plans
//! - `/admin/*` - user and plan management (admin role)

pub mod admin_routes;
pub mod auth_routes;
pub mod config;
pub mod error;
pub mod public_routes;
pub mod questionnaire_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppState;
