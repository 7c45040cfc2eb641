//! Aqeed Core
//!
//! Core types shared by the Aqeed backend client and command-line tools.
//!
//! This crate contains:
//! - Domain types: backend jobs and the outcome of a submission
//! - DTOs: request and response bodies for the analysis endpoints

pub mod domain;
pub mod dto;
