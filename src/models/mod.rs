//! Data models for requests, fields and templates.
//!
//! This module contains the core data structures shared by the parser, the field
//! addressor, the selection engine and the template compiler.

pub mod request;
pub mod template;

pub use request::{HttpMethod, Request, RequestBody};
pub use template::{
    BackendSchema, CandidateField, ModifiableField, SchemaParameter, Template, ValueType,
};
