pub mod details;
pub mod import_wizard;
pub mod list;
