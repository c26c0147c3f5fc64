//! finplan - questionnaire profiles in, financial guidance plans out
//!
//! - [`plan`]: the deterministic rules engine
//! - [`auth`]: accounts, roles and bearer sessions
//! - [`store`]: questionnaire accumulation and plan history
//! - [`http_server`]: the JSON API
//! - [`cli`]: `init`, `serve` and `plan` commands

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod plan;
pub mod store;
pub mod telemetry;
