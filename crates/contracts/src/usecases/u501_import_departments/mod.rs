pub mod file_kind;
pub mod response;

pub use file_kind::{ImportFileKind, ACCEPTED_EXTENSIONS};
pub use response::{
    ImportExecuteResponse, ImportPreviewResponse, ImportResults, ImportRow, ImportSummary,
    InvalidImportRow,
};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportDepartments;

impl UseCaseMetadata for ImportDepartments {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_departments"
    }

    fn display_name() -> &'static str {
        "Импорт отделов"
    }

    fn description() -> &'static str {
        "Загрузка отделов из файла Excel/CSV с предварительным просмотром"
    }
}
