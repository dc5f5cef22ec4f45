use crate::domain::a001_department::import_file::{ImportFile, UnsupportedFileType};
use contracts::usecases::u501_import_departments::{ImportExecuteResponse, ImportPreviewResponse};

/// Шаг мастера импорта, как он показывается в шапке (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload = 1,
    Preview = 2,
    Result = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Upload, WizardStep::Preview, WizardStep::Result];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Загрузка файла",
            WizardStep::Preview => "Предпросмотр",
            WizardStep::Result => "Результат",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Действие недоступно на текущем шаге")]
    WrongStage,
    #[error("Выберите файл для импорта")]
    NoFileSelected,
    #[error("В файле нет строк для импорта")]
    NothingToImport,
    #[error("Дождитесь окончания обработки файла")]
    Busy,
    /// После этого файла уже выбран другой
    #[error("Выбор файла «{0}» отменён более поздним выбором")]
    Superseded(String),
    #[error(transparent)]
    UnsupportedFile(#[from] UnsupportedFileType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStage {
    Upload {
        file: Option<ImportFile>,
    },
    Preview {
        file: ImportFile,
        preview: ImportPreviewResponse,
    },
    Result {
        result: ImportExecuteResponse,
    },
}

impl Default for WizardStage {
    fn default() -> Self {
        WizardStage::Upload { file: None }
    }
}

impl WizardStage {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardStage::Upload { .. } => WizardStep::Upload,
            WizardStage::Preview { .. } => WizardStep::Preview,
            WizardStage::Result { .. } => WizardStep::Result,
        }
    }

    /// Файл, выбранный на шаге загрузки или отправляемый с шага предпросмотра
    pub fn file(&self) -> Option<&ImportFile> {
        match self {
            WizardStage::Upload { file } => file.as_ref(),
            WizardStage::Preview { file, .. } => Some(file),
            WizardStage::Result { .. } => None,
        }
    }

    /// Выбор файла (диалог или drag-and-drop). Неподходящий файл не заменяет
    /// уже выбранный.
    pub fn select_file(&mut self, file: ImportFile) -> Result<(), WizardError> {
        match self {
            WizardStage::Upload { file: slot } => {
                *slot = Some(file);
                Ok(())
            }
            _ => Err(WizardError::WrongStage),
        }
    }

    /// Файл, который нужно отправить на предпросмотр
    pub fn pending_preview(&self) -> Result<ImportFile, WizardError> {
        match self {
            WizardStage::Upload { file: Some(file) } => Ok(file.clone()),
            WizardStage::Upload { file: None } => Err(WizardError::NoFileSelected),
            _ => Err(WizardError::WrongStage),
        }
    }

    /// Классификация получена для `file`: на шаге предпросмотра хранится
    /// именно отправленный файл, а не текущее содержимое слота.
    pub fn preview_loaded(
        &mut self,
        file: ImportFile,
        preview: ImportPreviewResponse,
    ) -> Result<(), WizardError> {
        if !matches!(self, WizardStage::Upload { .. }) {
            return Err(WizardError::WrongStage);
        }
        *self = WizardStage::Preview { file, preview };
        Ok(())
    }

    /// "Назад": классификация отбрасывается, файл остаётся выбранным
    pub fn back_to_upload(&mut self) -> Result<(), WizardError> {
        let file = match self {
            WizardStage::Preview { file, .. } => file.clone(),
            _ => return Err(WizardError::WrongStage),
        };
        *self = WizardStage::Upload { file: Some(file) };
        Ok(())
    }

    pub fn can_commit(&self) -> bool {
        match self {
            WizardStage::Preview { preview, .. } => preview.summary.has_importable_rows(),
            _ => false,
        }
    }

    /// Тот же файл, что ушёл на предпросмотр
    pub fn pending_commit(&self) -> Result<ImportFile, WizardError> {
        match self {
            WizardStage::Preview { file, preview } => {
                if preview.summary.has_importable_rows() {
                    Ok(file.clone())
                } else {
                    Err(WizardError::NothingToImport)
                }
            }
            _ => Err(WizardError::WrongStage),
        }
    }

    pub fn commit_finished(&mut self, result: ImportExecuteResponse) -> Result<(), WizardError> {
        self.pending_commit()?;
        *self = WizardStage::Result { result };
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = WizardStage::default();
    }
}
