//! API operations
//!
//! Resource descriptors, list queries and the CRUD calls on
//! [`CampusClient`](crate::CampusClient).

mod crud;
mod query;
mod resource;

pub use query::Query;
pub use resource::Resource;
