//! Application state module

mod app_state;
mod forms;
pub mod record;
pub mod store;
pub mod summary;
pub mod upload;
pub mod validation;
pub mod wizard;

pub use app_state::*;
pub use forms::*;
pub use store::{FormStore, RecordError};
pub use wizard::WizardStep;
