//! Business rules for catalog entities, checked before anything reaches the store.

use crate::models::{Car, Motorbike};
use crate::validator::Validator;

const MAX_NAME_BYTES: usize = 500;
const MAX_SHORT_TEXT_BYTES: usize = 50;
const MAX_HORSEPOWER: f64 = 2000.0;
const MAX_MOTORBIKE_WEIGHT_KG: f64 = 1000.0;

fn check_required_text(v: &mut Validator, value: &str, field: &str, max_bytes: usize) {
    v.check(!value.is_empty(), field, "must be provided");
    v.check(
        value.len() <= max_bytes,
        field,
        &format!("must not be more than {} bytes long", max_bytes),
    );
}

fn check_required_number(v: &mut Validator, value: f64, field: &str) {
    v.check(value != 0.0, field, "must be provided");
}

pub fn validate_car(v: &mut Validator, car: &Car) {
    check_required_text(v, &car.name, "name", MAX_NAME_BYTES);
    check_required_text(v, &car.body, "body", MAX_SHORT_TEXT_BYTES);
    check_required_text(v, &car.brake_system, "brake_system", MAX_SHORT_TEXT_BYTES);
    check_required_text(v, &car.aspiration, "aspiration", MAX_SHORT_TEXT_BYTES);

    check_required_number(v, car.horsepower, "horsepower");
    v.check(car.horsepower <= MAX_HORSEPOWER, "horsepower", "must be less than 2000");

    check_required_number(v, car.mpg, "mpg");

    v.check(car.cylinders != 0, "cylinders", "must be provided");
    // Two-cylinder cars are rejected while two-cylinder motorbikes pass; pending product confirmation.
    v.check(
        car.cylinders % 2 == 0 && car.cylinders != 2,
        "cylinders",
        "must be 4, 6, 8, 12 etc...",
    );

    check_required_number(v, car.acceleration, "acceleration");
    check_required_number(v, car.displacement, "displacement");

    check_required_text(v, &car.origin, "origin", MAX_SHORT_TEXT_BYTES);
}

pub fn validate_motorbike(v: &mut Validator, bike: &Motorbike) {
    check_required_text(v, &bike.name, "name", MAX_NAME_BYTES);

    check_required_number(v, bike.horsepower, "horsepower");
    v.check(bike.horsepower <= MAX_HORSEPOWER, "horsepower", "must be less than 2000");

    check_required_text(v, &bike.kind, "type", MAX_SHORT_TEXT_BYTES);

    check_required_number(v, bike.weight, "weight");
    v.check(bike.weight <= MAX_MOTORBIKE_WEIGHT_KG, "weight", "must be less than 1000kg");

    v.check(bike.cylinders != 0, "cylinders", "must be provided");
    v.check(bike.cylinders % 2 == 0, "cylinders", "must be 2, 4 etc...");

    check_required_number(v, bike.acceleration, "acceleration");
    check_required_number(v, bike.displacement, "displacement");

    check_required_text(v, &bike.origin, "origin", MAX_SHORT_TEXT_BYTES);
}
