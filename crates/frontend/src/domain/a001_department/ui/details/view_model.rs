use contracts::domain::a001_department::aggregate::{Department, DepartmentDto, DepartmentId};
use leptos::prelude::*;

/// ViewModel for Department details form
#[derive(Clone, Copy)]
pub struct DepartmentDetailsViewModel {
    pub form: RwSignal<DepartmentDto>,
    /// `Some` при редактировании существующего отдела
    pub editing_id: RwSignal<Option<DepartmentId>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl DepartmentDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(DepartmentDto::default()),
            editing_id: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    /// Пустая форма для нового отдела
    pub fn reset_for_create(&self) {
        self.form.set(DepartmentDto::default());
        self.editing_id.set(None);
        self.error.set(None);
        self.saving.set(false);
    }

    /// Форма, заполненная данными существующего отдела
    pub fn fill_from(&self, department: &Department) {
        self.form.set(DepartmentDto::from(department));
        self.editing_id.set(Some(department.id.clone()));
        self.error.set(None);
        self.saving.set(false);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.with(|id| id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    /// Данные для отправки. При ошибке валидации сообщение уходит в `error`
    /// и возвращается `None`: запрос в этом случае не выполняется.
    pub fn prepare_submit(&self) -> Option<(DepartmentDto, Option<DepartmentId>)> {
        let dto = self.form.get_untracked().normalized();
        if let Err(message) = dto.validate() {
            self.error.set(Some(message));
            return None;
        }
        self.error.set(None);
        Some((dto, self.editing_id.get_untracked()))
    }

    /// Обновить одно поле формы; пустые необязательные поля хранятся как `None`
    pub fn set_field(&self, field: DepartmentField, value: String) {
        let optional = if value.is_empty() { None } else { Some(value.clone()) };
        self.form.update(|f| match field {
            DepartmentField::Name => f.name = value,
            DepartmentField::Code => f.code = optional,
            DepartmentField::Location => f.location = optional,
            DepartmentField::ManagerName => f.manager_name = optional,
            DepartmentField::Phone => f.phone = optional,
        });
    }

    pub fn field_value(&self, field: DepartmentField) -> String {
        self.form.with(|f| match field {
            DepartmentField::Name => f.name.clone(),
            DepartmentField::Code => f.code.clone().unwrap_or_default(),
            DepartmentField::Location => f.location.clone().unwrap_or_default(),
            DepartmentField::ManagerName => f.manager_name.clone().unwrap_or_default(),
            DepartmentField::Phone => f.phone.clone().unwrap_or_default(),
        })
    }
}

impl Default for DepartmentDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentField {
    Name,
    Code,
    Location,
    ManagerName,
    Phone,
}

impl DepartmentField {
    pub const ALL: [DepartmentField; 5] = [
        DepartmentField::Name,
        DepartmentField::Code,
        DepartmentField::Location,
        DepartmentField::ManagerName,
        DepartmentField::Phone,
    ];

    pub fn input_id(&self) -> &'static str {
        match self {
            DepartmentField::Name => "department-name",
            DepartmentField::Code => "department-code",
            DepartmentField::Location => "department-location",
            DepartmentField::ManagerName => "department-manager",
            DepartmentField::Phone => "department-phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepartmentField::Name => "Название *",
            DepartmentField::Code => "Код",
            DepartmentField::Location => "Расположение",
            DepartmentField::ManagerName => "Руководитель",
            DepartmentField::Phone => "Телефон",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            DepartmentField::Name => "Например: Бухгалтерия",
            DepartmentField::Code => "Короткий код, по нему сопоставляется импорт",
            DepartmentField::Location => "Корпус, этаж, кабинет",
            DepartmentField::ManagerName => "ФИО руководителя",
            DepartmentField::Phone => "+7 ...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_department::test_support::department;

    #[test]
    fn test_prepare_submit_rejects_blank_name() {
        let vm = DepartmentDetailsViewModel::new();
        vm.set_field(DepartmentField::Name, "   ".into());
        assert!(vm.prepare_submit().is_none());
        assert!(vm.error.get_untracked().is_some());
    }

    #[test]
    fn test_prepare_submit_normalizes_and_clears_error() {
        let vm = DepartmentDetailsViewModel::new();
        vm.error.set(Some("старая ошибка".into()));
        vm.set_field(DepartmentField::Name, " Склад ".into());
        vm.set_field(DepartmentField::Code, "WH".into());
        vm.set_field(DepartmentField::Phone, " ".into());

        let (dto, editing_id) = vm.prepare_submit().unwrap();
        assert_eq!(dto.name, "Склад");
        assert_eq!(dto.code.as_deref(), Some("WH"));
        assert_eq!(dto.phone, None);
        assert_eq!(editing_id, None);
        assert_eq!(vm.error.get_untracked(), None);
    }

    #[test]
    fn test_fill_from_and_reset() {
        let vm = DepartmentDetailsViewModel::new();
        vm.fill_from(&department("7", "HR", Some("HR")));
        assert_eq!(vm.editing_id.get_untracked(), Some(DepartmentId::new("7")));
        assert_eq!(vm.form.get_untracked().name, "HR");

        vm.reset_for_create();
        assert_eq!(vm.editing_id.get_untracked(), None);
        assert_eq!(vm.form.get_untracked(), DepartmentDto::default());
    }

    #[test]
    fn test_set_field_empty_optional_is_none() {
        let vm = DepartmentDetailsViewModel::new();
        vm.set_field(DepartmentField::Location, "2 этаж".into());
        vm.set_field(DepartmentField::Location, String::new());
        assert_eq!(vm.form.get_untracked().location, None);
    }
}
