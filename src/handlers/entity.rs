//! Entity CRUD handlers, generic over any [`Resource`]: create, show, update, delete, list.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::filters::{validate_filters, Filters, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT};
use crate::models::Resource;
use crate::response::{envelope, envelope_page, message, Envelope};
use crate::service::CrudService;
use crate::state::AppState;
use crate::validator::Validator;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::collections::HashMap;

/// Ids that do not parse are treated like ids that do not exist.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse::<i64>().map_err(|_| AppError::NotFound)
}

fn read_string(params: &HashMap<String, String>, key: &str, default: &str) -> String {
    params
        .get(key)
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn read_int(params: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match params.get(key).filter(|s| !s.is_empty()) {
        None => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<R::Input>,
) -> Result<impl IntoResponse, AppError> {
    let mut record = R::from_input(input);
    let mut v = Validator::new();
    record.validate(&mut v);
    v.into_result()?;

    CrudService::insert(&state.pool, &mut record).await?;
    tracing::info!(resource = R::SINGULAR, id = record.id(), "created");

    let location = format!("/v1/{}/{}", R::PLURAL, record.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        envelope(R::SINGULAR, &record)?,
    ))
}

pub async fn show<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope, AppError> {
    let id = parse_id(&id_str)?;
    let record: R = CrudService::get(&state.pool, id).await?;
    envelope(R::SINGULAR, &record)
}

/// Read-modify-write: fields absent from the body keep their stored values, the merged
/// record is re-validated, and the write only lands if nobody updated it in between.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(patch): JsonBody<R::Patch>,
) -> Result<Envelope, AppError> {
    let id = parse_id(&id_str)?;
    let mut record: R = CrudService::get(&state.pool, id).await?;
    record.apply_patch(patch);

    let mut v = Validator::new();
    record.validate(&mut v);
    v.into_result()?;

    CrudService::update(&state.pool, &mut record).await?;
    tracing::info!(resource = R::SINGULAR, id, version = record.version(), "updated");
    envelope(R::SINGULAR, &record)
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Envelope, AppError> {
    let id = parse_id(&id_str)?;
    CrudService::delete::<R>(&state.pool, id).await?;
    tracing::info!(resource = R::SINGULAR, id, "deleted");
    Ok(message(format!("{} successfully deleted", R::SINGULAR)))
}

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Envelope, AppError> {
    let mut v = Validator::new();
    let name = read_string(&params, "name", "");
    let filters = Filters {
        page: read_int(&params, "page", DEFAULT_PAGE, &mut v),
        page_size: read_int(&params, "page_size", DEFAULT_PAGE_SIZE, &mut v),
        sort: read_string(&params, "sort", DEFAULT_SORT),
        sort_safelist: R::SORT_SAFELIST,
    };
    validate_filters(&mut v, &filters);
    v.into_result()?;

    let (records, metadata) =
        CrudService::get_all::<R>(&state.pool, &name, &filters, state.config.list_query_timeout).await?;
    envelope_page(R::PLURAL, records, metadata)
}
