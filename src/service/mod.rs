//! CrudService: generic CRUD using the safe SQL builder, plus entity business rules.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{validate_car, validate_motorbike};
