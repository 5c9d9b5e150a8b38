use super::{Record, Resource};
use crate::service::validate_motorbike;
use crate::sql::{PgBindValue, Table};
use crate::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Motorbike {
    pub id: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub horsepower: f64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    /// Kilograms.
    pub weight: f64,
    pub third_place: bool,
    pub cylinders: i64,
    pub acceleration: f64,
    pub displacement: f64,
    pub origin: String,
    pub version: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorbikeInput {
    pub name: String,
    pub horsepower: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: f64,
    pub third_place: bool,
    pub cylinders: i64,
    pub acceleration: f64,
    pub displacement: f64,
    pub origin: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorbikePatch {
    pub name: Option<String>,
    pub horsepower: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub weight: Option<f64>,
    pub third_place: Option<bool>,
    pub cylinders: Option<i64>,
    pub acceleration: Option<f64>,
    pub displacement: Option<f64>,
    pub origin: Option<String>,
}

impl Record for Motorbike {
    const TABLE: Table = Table {
        name: "motorbikes",
        columns: &[
            "name",
            "horsepower",
            "type",
            "weight",
            "third_place",
            "cylinders",
            "acceleration",
            "displacement",
            "origin",
        ],
        search_column: "name",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn bind_values(&self) -> Vec<PgBindValue> {
        vec![
            (&self.name).into(),
            self.horsepower.into(),
            (&self.kind).into(),
            self.weight.into(),
            self.third_place.into(),
            self.cylinders.into(),
            self.acceleration.into(),
            self.displacement.into(),
            (&self.origin).into(),
        ]
    }

    fn set_inserted(&mut self, id: i64, created_at: DateTime<Utc>, version: i32) {
        self.id = id;
        self.created_at = created_at;
        self.version = version;
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

impl Resource for Motorbike {
    const SINGULAR: &'static str = "motorbike";
    const PLURAL: &'static str = "motorbikes";
    const SORT_SAFELIST: &'static [&'static str] = &["id", "name", "type", "-id", "-name", "-type"];

    type Input = MotorbikeInput;
    type Patch = MotorbikePatch;

    fn from_input(input: MotorbikeInput) -> Self {
        Motorbike {
            id: 0,
            created_at: Utc::now(),
            name: input.name,
            horsepower: input.horsepower,
            kind: input.kind,
            weight: input.weight,
            third_place: input.third_place,
            cylinders: input.cylinders,
            acceleration: input.acceleration,
            displacement: input.displacement,
            origin: input.origin,
            version: 0,
        }
    }

    fn apply_patch(&mut self, patch: MotorbikePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(horsepower) = patch.horsepower {
            self.horsepower = horsepower;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(third_place) = patch.third_place {
            self.third_place = third_place;
        }
        if let Some(cylinders) = patch.cylinders {
            self.cylinders = cylinders;
        }
        if let Some(acceleration) = patch.acceleration {
            self.acceleration = acceleration;
        }
        if let Some(displacement) = patch.displacement {
            self.displacement = displacement;
        }
        if let Some(origin) = patch.origin {
            self.origin = origin;
        }
    }

    fn validate(&self, v: &mut Validator) {
        validate_motorbike(v, self);
    }
}
