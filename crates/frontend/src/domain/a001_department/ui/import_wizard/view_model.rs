use super::state::{WizardError, WizardStage, WizardStep};
use crate::domain::a001_department::api::DepartmentApi;
use crate::domain::a001_department::import_file::{check_file_name, ImportFile};
use crate::shared::download::DownloadFile;
use crate::shared::toast::ToastService;
use leptos::prelude::*;

pub const TEMPLATE_FILE_NAME: &str = "departments_import_template.xlsx";

/// ViewModel мастера импорта отделов
#[derive(Clone, Copy)]
pub struct ImportWizardViewModel<A> {
    api: A,
    pub toasts: ToastService,
    pub stage: RwSignal<WizardStage>,
    /// Идёт запрос к сервису; повторные нажатия игнорируются
    pub busy: RwSignal<bool>,
    pub drag_over: RwSignal<bool>,
    /// Номер последнего принятого выбора файла; более ранние чтения отбрасываются
    pick_seq: RwSignal<u64>,
}

impl<A: DepartmentApi> ImportWizardViewModel<A> {
    pub fn new(api: A, toasts: ToastService) -> Self {
        Self {
            api,
            toasts,
            stage: RwSignal::new(WizardStage::default()),
            busy: RwSignal::new(false),
            drag_over: RwSignal::new(false),
            pick_seq: RwSignal::new(0),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.stage.with(WizardStage::step)
    }

    /// Проверка имени до чтения файла. Неподходящий файл отклоняется
    /// с уведомлением, ранее выбранный файл сохраняется. Пока идёт запрос,
    /// новый файл не принимается.
    ///
    /// Возвращает номер выбора, который потом передаётся в `select_file`.
    pub fn accept_file_name(&self, file_name: &str) -> Option<u64> {
        if self.busy.get_untracked() {
            log::debug!("Файл {file_name} пропущен: идёт запрос");
            self.toasts.info(WizardError::Busy.to_string());
            return None;
        }
        match check_file_name(file_name) {
            Ok(_) => {
                self.pick_seq.update(|n| *n += 1);
                Some(self.pick_seq.get_untracked())
            }
            Err(e) => {
                log::warn!("Файл отклонён: {file_name}");
                self.toasts.error(e.to_string());
                None
            }
        }
    }

    /// Положить прочитанный файл в слот шага загрузки. Файл из устаревшего
    /// выбора (после него выбран другой) молча отбрасывается.
    pub fn select_file(&self, ticket: u64, file: ImportFile) -> Result<(), WizardError> {
        if ticket != self.pick_seq.get_untracked() {
            log::debug!("Файл {} заменён более поздним выбором", file.name);
            return Err(WizardError::Superseded(file.name));
        }
        if self.busy.get_untracked() {
            self.toasts.info(WizardError::Busy.to_string());
            return Err(WizardError::Busy);
        }

        let name = file.name.clone();
        let result = self
            .stage
            .try_update(|s| s.select_file(file))
            .unwrap_or(Err(WizardError::WrongStage));
        match &result {
            Ok(()) => log::debug!("Выбран файл импорта: {name}"),
            Err(e) => {
                self.toasts.error(e.to_string());
            }
        }
        result
    }

    /// Отправить выбранный файл на предварительную проверку
    pub async fn preview(&self) {
        if self.busy.get_untracked() {
            return;
        }
        let file = match self.stage.with_untracked(WizardStage::pending_preview) {
            Ok(file) => file,
            Err(e) => {
                self.toasts.error(e.to_string());
                return;
            }
        };

        self.busy.set(true);
        let result = self.api.import_preview(&file).await;
        self.busy.set(false);

        match result {
            Ok(preview) => {
                log::info!(
                    "Предпросмотр {}: всего {}, новых {}, обновлений {}, ошибок {}",
                    file.name,
                    preview.summary.total,
                    preview.summary.valid,
                    preview.summary.updates,
                    preview.summary.invalid
                );
                if !preview.summary.is_consistent() {
                    log::warn!("Сводка предпросмотра не сходится: {:?}", preview.summary);
                }
                self.apply(|s| s.preview_loaded(file, preview));
            }
            Err(e) => {
                log::error!("Предпросмотр импорта не удался: {e}");
                self.toasts.error(e.user_message("Не удалось проверить файл"));
            }
        }
    }

    pub fn previous(&self) {
        if !self.busy.get_untracked() {
            self.apply(WizardStage::back_to_upload);
        }
    }

    pub fn can_commit(&self) -> bool {
        !self.busy.get() && self.stage.with(WizardStage::can_commit)
    }

    /// Загрузить тот же файл. При успехе вызывается `on_imported`,
    /// при ошибке мастер остаётся на предпросмотре.
    pub async fn execute(&self, on_imported: impl FnOnce()) {
        if self.busy.get_untracked() {
            return;
        }
        let file = match self.stage.with_untracked(WizardStage::pending_commit) {
            Ok(file) => file,
            Err(e) => {
                self.toasts.error(e.to_string());
                return;
            }
        };

        self.busy.set(true);
        let result = self.api.import_execute(&file).await;
        self.busy.set(false);

        match result {
            Ok(response) => {
                let results = response.results;
                log::info!(
                    "Импорт {}: добавлено {}, обновлено {}, пропущено {}",
                    file.name,
                    results.inserted,
                    results.updated,
                    results.skipped
                );
                let message = if response.message.trim().is_empty() {
                    "Импорт завершён".to_string()
                } else {
                    response.message.clone()
                };
                if self.apply(|s| s.commit_finished(response)) {
                    self.toasts.success(message);
                    on_imported();
                }
            }
            Err(e) => {
                log::error!("Импорт отделов не удался: {e}");
                self.toasts.error(e.user_message("Не удалось импортировать отделы"));
            }
        }
    }

    /// Закрыть мастер с любого шага; состояние сбрасывается
    pub fn close(&self, on_close: impl FnOnce()) {
        if self.busy.get_untracked() {
            return;
        }
        self.stage.update(WizardStage::reset);
        self.drag_over.set(false);
        on_close();
    }

    pub async fn download_template(&self) -> Option<DownloadFile> {
        if self.busy.get_untracked() {
            return None;
        }
        self.busy.set(true);
        let result = self.api.import_template().await;
        self.busy.set(false);

        match result {
            Ok(bytes) => Some(DownloadFile::xlsx(TEMPLATE_FILE_NAME, bytes)),
            Err(e) => {
                log::error!("Не удалось получить шаблон импорта: {e}");
                self.toasts.error(e.user_message("Не удалось скачать шаблон"));
                None
            }
        }
    }

    fn apply(&self, transition: impl FnOnce(&mut WizardStage) -> Result<(), WizardError>) -> bool {
        let result = self
            .stage
            .try_update(transition)
            .unwrap_or(Err(WizardError::WrongStage));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Переход мастера отклонён: {e}");
                false
            }
        }
    }
}
