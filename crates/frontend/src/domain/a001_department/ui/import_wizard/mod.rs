//! Import Wizard: Upload → Preview → Result
//!
//! - state.rs: stage enum and its transitions
//! - view_model.rs: service calls, busy flag, notifications
//! - view.rs: Leptos components

mod state;
mod view;
mod view_model;

pub use state::{WizardError, WizardStage, WizardStep};
pub use view::ImportWizard;
pub use view_model::{ImportWizardViewModel, TEMPLATE_FILE_NAME};
