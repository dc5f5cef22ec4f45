//! Department Details UI Module
//!
//! - view_model.rs: form state and local validation
//! - view.rs: Leptos component (pure UI)
//!
//! Saving goes through the list view-model: it owns the create/update call
//! and the refetch that follows it.

mod view;
mod view_model;

pub use view::DepartmentDetails;
pub use view_model::DepartmentDetailsViewModel;
