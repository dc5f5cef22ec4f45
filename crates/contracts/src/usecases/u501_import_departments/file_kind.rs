/// Расширения, которые принимает мастер импорта
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".xlsx", ".xls", ".csv"];

/// Тип файла импорта. Определяется только по расширению имени,
/// содержимое не проверяется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFileKind {
    Xlsx,
    Xls,
    Csv,
}

impl ImportFileKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else if lower.ends_with(".xls") {
            Some(Self::Xls)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Xls => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
        }
    }

    /// Значение атрибута `accept` для `<input type="file">`
    pub fn accept_attr() -> String {
        ACCEPTED_EXTENSIONS.join(",")
    }
}
