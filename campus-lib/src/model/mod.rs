//! Data model: dynamic values and records.

mod record;
mod record_serde;
mod value;

pub use record::{INTERNAL_ID_KEY, Record, VERSION_KEY};
pub use value::Value;
