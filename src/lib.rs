//! Price Engine library crate.
//!
//! This crate exposes the core project pricing engine and API
//! components as reusable modules.  External applications may
//! depend on the `price_engine` crate and call into
//! `engine::calculate_project_price` directly or embed the API via
//! `api::build_router`.

pub mod models;
pub mod settings;
pub mod engine;
pub mod api;
