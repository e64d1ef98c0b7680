//! Campus REST API client library
//!
//! Dynamic records, error types and an async client for the student/teacher
//! administration API.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;

mod client;

pub use client::*;
