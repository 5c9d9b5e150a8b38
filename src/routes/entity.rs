//! Entity CRUD routes: one collection path and one item path per resource.

use crate::handlers::entity::{create, delete as delete_handler, list, show, update};
use crate::models::{Car, Motorbike, Resource};
use crate::state::AppState;
use axum::{routing::get, Router};

fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/v1/{}", R::PLURAL);
    let item = format!("{}/:id", collection);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(show::<R>).patch(update::<R>).delete(delete_handler::<R>))
}

/// /v1/cars and /v1/motorbikes.
pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<Car>())
        .merge(resource_routes::<Motorbike>())
}
