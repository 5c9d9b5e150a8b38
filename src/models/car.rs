use super::{Record, Resource};
use crate::service::validate_car;
use crate::sql::{PgBindValue, Table};
use crate::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Car {
    pub id: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub body: String,
    pub brake_system: String,
    pub aspiration: String,
    pub horsepower: f64,
    pub mpg: f64,
    pub cylinders: i64,
    pub acceleration: f64,
    pub displacement: f64,
    pub origin: String,
    /// Starts at 1 and is bumped by every successful update.
    pub version: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarInput {
    pub name: String,
    pub body: String,
    pub brake_system: String,
    pub aspiration: String,
    pub horsepower: f64,
    pub mpg: f64,
    pub cylinders: i64,
    pub acceleration: f64,
    pub displacement: f64,
    pub origin: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarPatch {
    pub name: Option<String>,
    pub body: Option<String>,
    pub brake_system: Option<String>,
    pub aspiration: Option<String>,
    pub horsepower: Option<f64>,
    pub mpg: Option<f64>,
    pub cylinders: Option<i64>,
    pub acceleration: Option<f64>,
    pub displacement: Option<f64>,
    pub origin: Option<String>,
}

impl Record for Car {
    const TABLE: Table = Table {
        name: "cars",
        columns: &[
            "name",
            "body",
            "brake_system",
            "aspiration",
            "horsepower",
            "mpg",
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
            (&self.body).into(),
            (&self.brake_system).into(),
            (&self.aspiration).into(),
            self.horsepower.into(),
            self.mpg.into(),
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

impl Resource for Car {
    const SINGULAR: &'static str = "car";
    const PLURAL: &'static str = "cars";
    const SORT_SAFELIST: &'static [&'static str] = &["id", "name", "body", "-id", "-name", "-body"];

    type Input = CarInput;
    type Patch = CarPatch;

    fn from_input(input: CarInput) -> Self {
        Car {
            id: 0,
            created_at: Utc::now(),
            name: input.name,
            body: input.body,
            brake_system: input.brake_system,
            aspiration: input.aspiration,
            horsepower: input.horsepower,
            mpg: input.mpg,
            cylinders: input.cylinders,
            acceleration: input.acceleration,
            displacement: input.displacement,
            origin: input.origin,
            version: 0,
        }
    }

    fn apply_patch(&mut self, patch: CarPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(brake_system) = patch.brake_system {
            self.brake_system = brake_system;
        }
        if let Some(aspiration) = patch.aspiration {
            self.aspiration = aspiration;
        }
        if let Some(horsepower) = patch.horsepower {
            self.horsepower = horsepower;
        }
        if let Some(mpg) = patch.mpg {
            self.mpg = mpg;
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
        validate_car(v, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CarInput {
        CarInput {
            name: "Mazda MX-5".into(),
            body: "roadster".into(),
            brake_system: "disc".into(),
            aspiration: "natural".into(),
            horsepower: 181.0,
            mpg: 29.0,
            cylinders: 4,
            acceleration: 5.7,
            displacement: 2.0,
            origin: "Japan".into(),
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut car = Car::from_input(input());
        car.set_inserted(9, Utc::now(), 3);
        let patch: CarPatch = serde_json::from_str(r#"{"horsepower": 300, "origin": "USA"}"#).unwrap();
        car.apply_patch(patch);
        assert_eq!(car.horsepower, 300.0);
        assert_eq!(car.origin, "USA");
        assert_eq!(car.name, "Mazda MX-5");
        assert_eq!(car.cylinders, 4);
        assert_eq!(car.version, 3);
    }

    #[test]
    fn bind_values_follow_column_order() {
        let car = Car::from_input(input());
        let values = car.bind_values();
        assert_eq!(values.len(), Car::TABLE.columns.len());
        assert_eq!(values[0], PgBindValue::Text("Mazda MX-5".into()));
        assert_eq!(values[6], PgBindValue::I64(4));
        assert_eq!(values[9], PgBindValue::Text("Japan".into()));
    }

    #[test]
    fn json_hides_created_at() {
        let car = Car::from_input(input());
        let json = serde_json::to_value(&car).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["brake_system"], "disc");
        assert_eq!(json["version"], 0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<CarInput>(r#"{"name": "x", "wheels": 4}"#);
        assert!(parsed.is_err());
    }
}
