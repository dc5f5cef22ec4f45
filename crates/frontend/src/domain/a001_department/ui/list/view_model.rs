use super::state::{create_state, DepartmentListState};
use crate::domain::a001_department::api::DepartmentApi;
use crate::domain::a001_department::ui::details::DepartmentDetailsViewModel;
use crate::shared::download::{dated_file_name, DownloadFile};
use crate::shared::list_utils::{filter_list, sort_list};
use crate::shared::toast::{ToastKind, ToastService};
use contracts::domain::a001_department::aggregate::{Department, DepartmentId};
use leptos::prelude::*;

/// ViewModel списка отделов.
///
/// Любая успешная мутация заканчивается полной перезагрузкой списка,
/// локально записи не правятся.
#[derive(Clone, Copy)]
pub struct DepartmentListViewModel<A> {
    api: A,
    pub toasts: ToastService,
    pub state: RwSignal<DepartmentListState>,
    pub details: DepartmentDetailsViewModel,
    pub show_details: RwSignal<bool>,
    /// Отдел, удаление которого ждёт подтверждения
    pub pending_delete: RwSignal<Option<Department>>,
    pub deleting: RwSignal<bool>,
    pub show_import: RwSignal<bool>,
    pub exporting: RwSignal<bool>,
}

impl<A: DepartmentApi> DepartmentListViewModel<A> {
    pub fn new(api: A, toasts: ToastService) -> Self {
        Self {
            api,
            toasts,
            state: create_state(),
            details: DepartmentDetailsViewModel::new(),
            show_details: RwSignal::new(false),
            pending_delete: RwSignal::new(None),
            deleting: RwSignal::new(false),
            show_import: RwSignal::new(false),
            exporting: RwSignal::new(false),
        }
    }

    // ------------------------------------------------------------------
    // Загрузка и отображение
    // ------------------------------------------------------------------

    /// Запросить весь список. При ошибке прежние данные остаются как есть.
    pub async fn load(&self) {
        self.state.update(|s| s.loading = true);
        match self.api.list().await {
            Ok(items) => {
                log::debug!("Загружено отделов: {}", items.len());
                self.state.update(|s| {
                    s.items = items;
                    s.is_loaded = true;
                    s.loading = false;
                });
            }
            Err(e) => {
                log::error!("Не удалось загрузить отделы: {e}");
                self.state.update(|s| s.loading = false);
            }
        }
    }

    /// Отфильтрованный и отсортированный список для таблицы
    pub fn visible_items(&self) -> Vec<Department> {
        self.state.with(|s| {
            let mut rows = filter_list(&s.items, &s.search_query);
            sort_list(&mut rows, &s.sort_field, s.sort_ascending);
            rows
        })
    }

    pub fn set_search(&self, query: String) {
        self.state.update(|s| s.search_query = query);
    }

    pub fn toggle_sort(&self, field: &str) {
        self.state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
        });
    }

    // ------------------------------------------------------------------
    // Создание / редактирование
    // ------------------------------------------------------------------

    pub fn open_create(&self) {
        self.details.reset_for_create();
        self.show_details.set(true);
    }

    /// Открыть форму для записи из текущего списка; неизвестный id игнорируется
    pub fn open_edit(&self, id: &DepartmentId) {
        let found = self
            .state
            .with_untracked(|s| s.items.iter().find(|d| &d.id == id).cloned());
        if let Some(department) = found {
            self.details.fill_from(&department);
            self.show_details.set(true);
        }
    }

    pub fn close_details(&self) {
        if !self.details.saving.get_untracked() {
            self.show_details.set(false);
        }
    }

    /// Создать или обновить отдел. `true`, если отдел сохранён и список перезагружен.
    /// Ошибка сервиса показывается в форме, форма остаётся открытой.
    pub async fn submit(&self) -> bool {
        if self.details.saving.get_untracked() {
            return false;
        }
        let Some((dto, editing_id)) = self.details.prepare_submit() else {
            return false;
        };

        self.details.saving.set(true);
        let result = match &editing_id {
            None => self.api.create(&dto).await,
            Some(id) => self.api.update(id, &dto).await,
        };
        self.details.saving.set(false);

        match result {
            Ok(saved) => {
                log::info!("Отдел сохранён: {} ({})", saved.name, saved.id);
                self.show_details.set(false);
                self.load().await;
                self.toasts.success(if editing_id.is_some() {
                    "Отдел обновлён"
                } else {
                    "Отдел создан"
                });
                true
            }
            Err(e) => {
                log::error!("Не удалось сохранить отдел: {e}");
                self.details
                    .error
                    .set(Some(e.user_message("Не удалось сохранить отдел")));
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Удаление (в два шага)
    // ------------------------------------------------------------------

    pub fn request_delete(&self, id: &DepartmentId) {
        let found = self
            .state
            .with_untracked(|s| s.items.iter().find(|d| &d.id == id).cloned());
        if found.is_some() {
            self.pending_delete.set(found);
        }
    }

    pub fn cancel_delete(&self) {
        if !self.deleting.get_untracked() {
            self.pending_delete.set(None);
        }
    }

    /// Удаляет только отдел, ожидающий подтверждения
    pub async fn confirm_delete(&self) {
        if self.deleting.get_untracked() {
            return;
        }
        let Some(target) = self.pending_delete.get_untracked() else {
            return;
        };

        self.deleting.set(true);
        let result = self.api.delete(&target.id).await;
        self.deleting.set(false);
        self.pending_delete.set(None);

        match result {
            Ok(()) => {
                log::info!("Отдел удалён: {} ({})", target.name, target.id);
                self.load().await;
                self.toasts
                    .success(format!("Отдел «{}» удалён", target.name));
            }
            Err(e) => {
                log::error!("Не удалось удалить отдел {}: {e}", target.id);
                self.toasts.error(e.user_message("Не удалось удалить отдел"));
            }
        }
    }

    // ------------------------------------------------------------------
    // Экспорт
    // ------------------------------------------------------------------

    /// Выгрузка в Excel. Файл для скачивания возвращается только при успехе.
    pub async fn export_spreadsheet(&self, today: chrono::NaiveDate) -> Option<DownloadFile> {
        if self.exporting.get_untracked() {
            return None;
        }
        self.exporting.set(true);
        let notice = self.toasts.loading("Формирование файла Excel...");
        let result = self.api.export_excel().await;
        self.exporting.set(false);

        match result {
            Ok(bytes) => {
                self.toasts
                    .resolve(notice, ToastKind::Success, "Файл Excel сформирован");
                Some(DownloadFile::xlsx(
                    dated_file_name("departments", today, "xlsx"),
                    bytes,
                ))
            }
            Err(e) => {
                log::error!("Экспорт отделов не удался: {e}");
                self.toasts.resolve(
                    notice,
                    ToastKind::Error,
                    e.user_message("Не удалось выгрузить отделы"),
                );
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Импорт
    // ------------------------------------------------------------------

    pub fn open_import(&self) {
        self.show_import.set(true);
    }

    pub fn close_import(&self) {
        self.show_import.set(false);
    }

    /// Колбэк мастера импорта после успешной загрузки
    pub async fn on_import_committed(&self) {
        self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_department::test_support::{department, service_error, Call, MockApi};
    use crate::domain::a001_department::api::ApiError;
    use crate::domain::a001_department::ui::details::DepartmentDetailsViewModel;
    use contracts::domain::a001_department::aggregate::DepartmentDto;
    use futures::executor::block_on;

    fn vm_with(api: &MockApi) -> DepartmentListViewModel<MockApi> {
        DepartmentListViewModel::new(api.clone(), ToastService::new())
    }

    fn fill_name(details: &DepartmentDetailsViewModel, name: &str) {
        details.form.update(|f| f.name = name.to_string());
    }

    fn is_list(c: &Call) -> bool {
        matches!(c, Call::List)
    }

    fn is_save(c: &Call) -> bool {
        matches!(c, Call::Create(_) | Call::Update(_, _))
    }

    #[test]
    fn test_load_replaces_items() {
        let api = MockApi::new().with_departments(vec![department("1", "IT", Some("IT"))]);
        let vm = vm_with(&api);

        block_on(vm.load());

        let state = vm.state.get_untracked();
        assert!(state.is_loaded);
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_load_failure_keeps_previous_items() {
        let api = MockApi::new().with_departments(vec![department("1", "IT", None)]);
        let vm = vm_with(&api);
        block_on(vm.load());

        api.fail_list(ApiError::Network("Failed to fetch".into()));
        block_on(vm.load());

        let state = vm.state.get_untracked();
        assert_eq!(state.items, vec![department("1", "IT", None)]);
        assert!(!state.loading);
        assert_eq!(api.count(is_list), 2);
    }

    #[test]
    fn test_create_issues_one_save_then_one_reload() {
        let api = MockApi::new();
        let vm = vm_with(&api);
        vm.open_create();
        fill_name(&vm.details, "Бухгалтерия");

        api.set_departments(vec![department("new", "Бухгалтерия", None)]);
        assert!(block_on(vm.submit()));

        assert_eq!(
            api.calls(),
            vec![
                Call::Create(DepartmentDto {
                    name: "Бухгалтерия".into(),
                    ..Default::default()
                }),
                Call::List,
            ]
        );
        assert!(!vm.show_details.get_untracked());
        assert_eq!(vm.state.get_untracked().items.len(), 1);
        assert_eq!(vm.toasts.entries()[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_edit_issues_update_for_editing_id() {
        let api = MockApi::new().with_departments(vec![department("5", "HR", Some("HR"))]);
        let vm = vm_with(&api);
        block_on(vm.load());

        vm.open_edit(&DepartmentId::new("5"));
        assert!(vm.show_details.get_untracked());
        fill_name(&vm.details, "Human Resources");
        assert!(block_on(vm.submit()));

        let calls = api.calls();
        assert_eq!(api.count(is_save), 1);
        assert!(matches!(
            &calls[1],
            Call::Update(id, dto) if id == &DepartmentId::new("5") && dto.name == "Human Resources"
        ));
        assert_eq!(calls[2], Call::List);
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn test_blank_name_makes_no_call() {
        let api = MockApi::new();
        let vm = vm_with(&api);
        vm.open_create();
        fill_name(&vm.details, "  ");

        assert!(!block_on(vm.submit()));
        assert!(api.calls().is_empty());
        assert!(vm.show_details.get_untracked());
        assert!(vm.details.error.get_untracked().is_some());
    }

    #[test]
    fn test_service_error_keeps_form_open_with_message() {
        let api = MockApi::new();
        api.fail_save(service_error("Отдел с кодом HR уже существует"));
        let vm = vm_with(&api);
        vm.open_create();
        fill_name(&vm.details, "HR");

        assert!(!block_on(vm.submit()));

        assert!(vm.show_details.get_untracked());
        assert_eq!(
            vm.details.error.get_untracked().as_deref(),
            Some("Отдел с кодом HR уже существует")
        );
        assert_eq!(api.count(is_list), 0);
        assert!(!vm.details.saving.get_untracked());
    }

    #[test]
    fn test_network_error_shows_generic_message() {
        let api = MockApi::new();
        api.fail_save(ApiError::Network("Failed to fetch".into()));
        let vm = vm_with(&api);
        vm.open_create();
        fill_name(&vm.details, "HR");

        block_on(vm.submit());

        assert_eq!(
            vm.details.error.get_untracked().as_deref(),
            Some("Не удалось сохранить отдел")
        );
    }

    #[test]
    fn test_open_edit_unknown_id_is_ignored() {
        let api = MockApi::new();
        let vm = vm_with(&api);
        vm.open_edit(&DepartmentId::new("404"));
        assert!(!vm.show_details.get_untracked());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let api = MockApi::new().with_departments(vec![department("3", "Склад", None)]);
        let vm = vm_with(&api);
        block_on(vm.load());

        // без запроса на подтверждение ничего не отправляется
        block_on(vm.confirm_delete());
        assert_eq!(api.count(|c| matches!(c, Call::Delete(_))), 0);

        // открыли подтверждение и отменили
        vm.request_delete(&DepartmentId::new("3"));
        vm.cancel_delete();
        block_on(vm.confirm_delete());
        assert_eq!(api.count(|c| matches!(c, Call::Delete(_))), 0);

        vm.request_delete(&DepartmentId::new("3"));
        assert!(vm.pending_delete.get_untracked().is_some());
        block_on(vm.confirm_delete());

        let calls = api.calls();
        assert_eq!(calls[1], Call::Delete(DepartmentId::new("3")));
        assert_eq!(calls[2], Call::List);
        assert!(vm.pending_delete.get_untracked().is_none());
        assert_eq!(vm.toasts.entries()[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_delete_failure_shows_service_message() {
        let api = MockApi::new().with_departments(vec![department("3", "Склад", None)]);
        api.fail_delete(service_error("В отделе есть сотрудники"));
        let vm = vm_with(&api);
        block_on(vm.load());

        vm.request_delete(&DepartmentId::new("3"));
        block_on(vm.confirm_delete());

        let toasts = vm.toasts.entries();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "В отделе есть сотрудники");
        assert_eq!(api.count(is_list), 1);
    }

    #[test]
    fn test_delete_transport_failure_shows_generic_message() {
        let api = MockApi::new().with_departments(vec![department("3", "Склад", None)]);
        api.fail_delete(ApiError::Status(500));
        let vm = vm_with(&api);
        block_on(vm.load());

        vm.request_delete(&DepartmentId::new("3"));
        block_on(vm.confirm_delete());

        assert_eq!(vm.toasts.entries()[0].message, "Не удалось удалить отдел");
    }

    #[test]
    fn test_export_success_names_file_with_date() {
        let api = MockApi::new();
        let vm = vm_with(&api);
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let file = block_on(vm.export_spreadsheet(today)).unwrap();

        assert_eq!(file.file_name, "departments_2024-03-15.xlsx");
        assert!(!file.bytes.is_empty());
        let toasts = vm.toasts.entries();
        assert_eq!(toasts.len(), 1, "loading toast is replaced");
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert!(!vm.exporting.get_untracked());
    }

    #[test]
    fn test_export_failure_gives_no_download() {
        let api = MockApi::new();
        api.export_returns(Err(ApiError::Status(500)));
        let vm = vm_with(&api);
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert!(block_on(vm.export_spreadsheet(today)).is_none());

        let toasts = vm.toasts.entries();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "Не удалось выгрузить отделы");
    }

    #[test]
    fn test_visible_items_filters_and_sorts() {
        let api = MockApi::new().with_departments(vec![
            department("1", "Склад", Some("WH")),
            department("2", "Бухгалтерия", Some("ACC")),
            department("3", "Архив", None),
        ]);
        let vm = vm_with(&api);
        block_on(vm.load());

        let names = |items: Vec<Department>| items.into_iter().map(|d| d.name).collect::<Vec<_>>();
        assert_eq!(names(vm.visible_items()), vec!["Архив", "Бухгалтерия", "Склад"]);

        vm.toggle_sort("code");
        assert_eq!(names(vm.visible_items()), vec!["Бухгалтерия", "Склад", "Архив"]);

        vm.set_search("wh".into());
        assert_eq!(names(vm.visible_items()), vec!["Склад"]);
        assert_eq!(vm.state.get_untracked().items.len(), 3);
    }

    #[test]
    fn test_import_committed_reloads() {
        let api = MockApi::new();
        let vm = vm_with(&api);
        vm.open_import();
        assert!(vm.show_import.get_untracked());

        block_on(vm.on_import_committed());
        assert_eq!(api.calls(), vec![Call::List]);
    }
}
