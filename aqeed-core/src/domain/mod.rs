//! Core domain types
//!
//! These types model the asynchronous job protocol spoken by the analysis
//! backend. Jobs are owned by the backend; the client only observes them.

pub mod job;
pub mod submit;
