//! Authentication
//!
//! The API uses bearer tokens. This crate never obtains tokens itself; it
//! asks a [`TokenProvider`] for the currently stored one and tells the
//! provider when the server rejected it.

mod token;

pub use token::StaticTokenProvider;
pub use token::TokenProvider;
