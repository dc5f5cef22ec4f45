//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a001_department--list"`) and `data-page-category` with one of the
//! constants below, so a DOM id leads straight to `domain/a001_department/`.

/// List of records with search and row actions.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Use-case wizard / action page (imports etc.).
pub const PAGE_CAT_USECASE: &str = "usecase";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_USECASE];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_department--list"));
        assert!(is_valid_page_id("u501_import_departments--usecase"));
        assert!(!is_valid_page_id("a001_department"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_department--dashboard"));
    }
}
