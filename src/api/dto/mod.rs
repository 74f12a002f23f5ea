//! Data Transfer Objects for REST request/response serialization.
//!
//! Entity records and create/patch bodies are the domain types themselves;
//! this module adds the envelopes, search shapes and boundary validation.

pub mod common_dto;
pub mod job_dto;
pub mod search_dto;
pub mod user_dto;

pub use common_dto::*;
pub use job_dto::*;
pub use search_dto::*;
pub use user_dto::*;
