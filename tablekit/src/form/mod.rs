//! Create/edit form built from a field schema.

mod events;
mod render;
mod state;
mod validate;

pub use events::FormEvent;
pub use render::{FieldView, FormView};
pub use state::{FormFocus, FormModal};
pub use validate::{is_blank, number_char, parse_number, validate_field};
