//! Step form layer
//!
//! Describes the focusable rows of each wizard step and tracks focus and the
//! draft text of list inputs. Values themselves live in the form store.

mod field;
mod form_state;

pub use field::{FieldKind, FormField};
pub use form_state::{Form, StepForm};
