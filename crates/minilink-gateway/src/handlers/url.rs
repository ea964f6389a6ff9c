use crate::error::Result;
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use minilink_core::{MappingStore, UrlCache};
use minilink_generator::CodeGenerator;

pub async fn create_url_handler<S, C, G>(
    State(state): State<AppState<S, C, G>>,
    body: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)>
where
    S: MappingStore,
    C: UrlCache,
    G: CodeGenerator,
{
    // a body that fails extraction is a client error, not a 422
    let Json(request) = body?;
    let created = state.creation.create(&request.domain, &request.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            url: request.url,
            shorten_url: created.shortened_url,
        }),
    ))
}

pub async fn redirect_handler<S, C, G>(
    Path(short_code): Path<String>,
    State(state): State<AppState<S, C, G>>,
) -> Result<(StatusCode, [(HeaderName, String); 1])>
where
    S: MappingStore,
    C: UrlCache,
    G: CodeGenerator,
{
    let url = state.resolution.resolve(&short_code).await?;
    // plain 302, matching what redirect-following clients expect here
    Ok((StatusCode::FOUND, [(LOCATION, url)]))
}
