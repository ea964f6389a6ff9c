//! HTTP surface for the minilink service.
//!
//! Thin wrappers around the creation and resolution services:
//! `POST /newurl`, `GET /{short_code}` (302 redirect) and `GET /health`.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
