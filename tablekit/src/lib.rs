//! Schema-driven table and form components for terminal consoles.
//!
//! Components never know what a record means. They are configured with
//! column/field schemas, receive records and caller-owned state, and report
//! user intent back as events:
//!
//! - [`table::Table`] - sortable, filterable, paginated record table
//! - [`form::FormModal`] - create/edit form built from a field schema
//! - [`detail::DetailModal`] - read-only record projection
//! - [`confirm::ConfirmDialog`] - destructive-action confirmation
//!
//! Each component builds a plain view model which [`paint`] draws into a
//! [`buffer::Buffer`]; [`terminal::Terminal`] flushes buffers to the screen.

pub mod buffer;
pub mod button;
pub mod confirm;
pub mod detail;
pub mod event;
pub mod filter;
pub mod form;
pub mod layout;
pub mod paint;
pub mod pagination;
pub mod schema;
pub mod table;
pub mod terminal;
pub mod text;
pub mod text_input;
pub mod theme;

/// Placeholder shown for missing or null values.
pub const PLACEHOLDER: &str = "—";

pub use event::{EventResult, Key, Modifiers};
pub use schema::{Column, Field, InputKind};
