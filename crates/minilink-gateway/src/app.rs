use axum::routing::{get, post};
use axum::Router;
use minilink_core::{MappingStore, UrlCache};
use minilink_generator::CodeGenerator;

use crate::handlers::{create_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router<S, C, G>(state: AppState<S, C, G>) -> Router
    where
        S: MappingStore,
        C: UrlCache,
        G: CodeGenerator,
    {
        Router::new()
            .route("/health", get(health_handler::<S, C, G>))
            .route("/newurl", post(create_url_handler::<S, C, G>))
            .route("/{short_code}", get(redirect_handler::<S, C, G>))
            .with_state(state)
    }
}
