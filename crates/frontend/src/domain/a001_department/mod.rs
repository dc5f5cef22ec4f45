pub mod api;
pub mod import_file;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
