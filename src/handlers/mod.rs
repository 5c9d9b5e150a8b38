//! HTTP handlers for catalog CRUD.

pub mod entity;
