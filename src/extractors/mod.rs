//! Request extractors.

pub mod json;
pub use json::{JsonBody, MAX_BODY_BYTES};
