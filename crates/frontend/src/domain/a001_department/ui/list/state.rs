use crate::shared::list_utils::{cmp_opt_text, Searchable, Sortable};
use contracts::domain::a001_department::aggregate::Department;
use leptos::prelude::*;
use std::cmp::Ordering;

#[derive(Clone, Debug)]
pub struct DepartmentListState {
    /// Последний успешно загруженный список; меняется только через `load()`
    pub items: Vec<Department>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
    pub loading: bool,
}

impl Default for DepartmentListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            is_loaded: false,
            loading: false,
        }
    }
}

pub fn create_state() -> RwSignal<DepartmentListState> {
    RwSignal::new(DepartmentListState::default())
}

impl Searchable for Department {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        let hit = |value: Option<&str>| {
            value
                .map(|v| v.to_lowercase().contains(filter_lower))
                .unwrap_or(false)
        };
        hit(Some(&self.name))
            || hit(self.code.as_deref())
            || hit(self.location.as_deref())
            || hit(self.manager_name.as_deref())
            || hit(self.phone.as_deref())
    }
}

impl Sortable for Department {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => cmp_opt_text(self.code.as_deref(), other.code.as_deref()),
            "location" => cmp_opt_text(self.location.as_deref(), other.location.as_deref()),
            "manager_name" => {
                cmp_opt_text(self.manager_name.as_deref(), other.manager_name.as_deref())
            }
            "phone" => cmp_opt_text(self.phone.as_deref(), other.phone.as_deref()),
            "employee_count" => self.employee_count.cmp(&other.employee_count),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}
