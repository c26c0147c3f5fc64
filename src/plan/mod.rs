//! # Plan Module
//!
//! The rules engine that turns a questionnaire profile into recommendations
//! and next steps. Nothing in here performs I/O.

pub mod engine;
pub mod guidance;
pub mod profile;
pub mod types;

pub use engine::{generate_items, generate_plan};
pub use profile::{Housing, Profile, Savings};
pub use types::{Plan, PlanItem, RuleGroup};
