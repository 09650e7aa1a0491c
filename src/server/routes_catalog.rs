//! Catalog browsing routes.
//!
//! Each handler maps its URL onto a [`CatalogPath`] and resolves it on the
//! blocking pool.

use super::error::AppError;
use super::request_id::RequestId;
use super::AppContext;
use crate::catalog::{CatalogPath, Listing, MEDIA_SEGMENT};
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use reelshelf_common::Error;
use std::sync::Arc;

type MaybeRequestId = Option<Extension<RequestId>>;

pub fn catalog_routes(tv_dir: &str) -> Router<AppContext> {
    Router::new()
        .route("/", get(landing))
        .route(&format!("/{MEDIA_SEGMENT}"), get(flat_catalog))
        .route(&format!("/{MEDIA_SEGMENT}/:key"), get(media_item))
        .route(&format!("/{tv_dir}"), get(show_list))
        .route(&format!("/{tv_dir}/:show"), get(show_detail))
        .route(&format!("/{tv_dir}/:show/:season"), get(season_detail))
        .route(
            &format!("/{tv_dir}/:show/:season/:language"),
            get(variant_detail),
        )
        .route("/:category", get(category_listing))
}

async fn landing(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Root).await
}

async fn flat_catalog(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::All).await
}

async fn media_item(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
    Path(key): Path<String>,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Item(key)).await
}

async fn category_listing(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
    Path(category): Path<String>,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Category(category)).await
}

async fn show_list(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Shows).await
}

async fn show_detail(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
    Path(show): Path<String>,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Show { show }).await
}

async fn season_detail(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
    Path((show, season)): Path<(String, String)>,
) -> Result<Json<Listing>, AppError> {
    resolve(ctx, request_id, CatalogPath::Season { show, season }).await
}

async fn variant_detail(
    State(ctx): State<AppContext>,
    request_id: MaybeRequestId,
    Path((show, season, language)): Path<(String, String, String)>,
) -> Result<Json<Listing>, AppError> {
    let path = CatalogPath::Variant {
        show,
        season,
        language,
    };
    resolve(ctx, request_id, path).await
}

async fn resolve(
    ctx: AppContext,
    request_id: MaybeRequestId,
    path: CatalogPath,
) -> Result<Json<Listing>, AppError> {
    let resolver = Arc::clone(&ctx.resolver);
    let outcome = tokio::task::spawn_blocking(move || resolver.resolve(&path))
        .await
        .unwrap_or_else(|e| Err(Error::internal(format!("Resolver task failed: {e}"))));

    outcome.map(Json).map_err(|e| {
        let err = AppError::new(e);
        match request_id {
            Some(Extension(RequestId(id))) => err.with_request_id(id),
            None => err,
        }
    })
}
