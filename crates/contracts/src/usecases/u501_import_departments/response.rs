use serde::{Deserialize, Serialize};

/// Сводка предварительной классификации файла
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Всего строк данных в файле
    #[serde(default)]
    pub total: u32,

    /// Новые отделы (код не найден среди существующих)
    #[serde(default)]
    pub valid: u32,

    /// Строки, код которых совпал с существующим отделом
    #[serde(default)]
    pub updates: u32,

    /// Строки, не прошедшие валидацию
    #[serde(default)]
    pub invalid: u32,
}

impl ImportSummary {
    /// `valid + updates + invalid == total`.
    /// Клиент это не проверяет, это обязательство сервиса.
    pub fn is_consistent(&self) -> bool {
        self.valid as u64 + self.updates as u64 + self.invalid as u64 == self.total as u64
    }

    /// Есть ли что загружать: хотя бы одна новая или обновляемая строка
    pub fn has_importable_rows(&self) -> bool {
        self.valid > 0 || self.updates > 0
    }
}

/// Строка из наборов `valid` и `updates`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(default)]
    pub row: Option<u32>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default, alias = "manager")]
    pub manager_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

/// Отклонённая строка с номером строки в файле и списком ошибок
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvalidImportRow {
    #[serde(default)]
    pub row: u32,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub errors: Vec<String>,
}

/// Ответ `POST /departments/import/preview`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportPreviewResponse {
    pub summary: ImportSummary,

    #[serde(default)]
    pub valid: Vec<ImportRow>,

    #[serde(default)]
    pub updates: Vec<ImportRow>,

    #[serde(default)]
    pub invalid: Vec<InvalidImportRow>,
}

/// Итоговые счётчики загрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportResults {
    #[serde(default)]
    pub inserted: u32,

    #[serde(default)]
    pub updated: u32,

    #[serde(default)]
    pub skipped: u32,
}

/// Ответ `POST /departments/import/execute`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportExecuteResponse {
    #[serde(default)]
    pub message: String,

    pub results: ImportResults,
}
