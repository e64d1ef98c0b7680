//! Terminal console for the campus student/teacher API.

pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod pages;
pub mod paths;
pub mod store;
pub mod toast;
