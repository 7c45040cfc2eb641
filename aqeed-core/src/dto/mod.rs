//! Data Transfer Objects for the analysis backend
//!
//! Request and response bodies exchanged with the backend HTTP API. Field
//! names follow the backend's JSON exactly.

pub mod analysis;
pub mod job;
pub mod vendor;
