//! services/api/src/lib.rs
//!
//! The library crate for the API service. The `api` binary and the
//! integration tests both build on these modules.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
