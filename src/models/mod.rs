//! Catalog entities and the traits that describe them to the data layer and the HTTP handlers.

mod car;
mod motorbike;

pub use car::{Car, CarInput, CarPatch};
pub use motorbike::{Motorbike, MotorbikeInput, MotorbikePatch};

use crate::sql::{PgBindValue, Table};
use crate::validator::Validator;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A row in an entity table with a server-assigned id, creation time and version counter.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: Table;

    fn id(&self) -> i64;

    fn version(&self) -> i32;

    /// Business field values in `TABLE.columns` order.
    fn bind_values(&self) -> Vec<PgBindValue>;

    fn set_inserted(&mut self, id: i64, created_at: DateTime<Utc>, version: i32);

    fn set_version(&mut self, version: i32);
}

/// A record exposed under `/v1/{PLURAL}`.
pub trait Resource: Record + Serialize + Sync + 'static {
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    /// Sort keys accepted by the list endpoint, including their `-` forms.
    const SORT_SAFELIST: &'static [&'static str];

    /// Create payload; absent fields take their zero value and fail validation.
    type Input: DeserializeOwned + Send + 'static;
    /// Update payload; only fields present in the body are applied.
    type Patch: DeserializeOwned + Send + 'static;

    fn from_input(input: Self::Input) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    fn validate(&self, v: &mut Validator);
}
