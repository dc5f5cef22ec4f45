//! Файл, выбранный в мастере импорта.
//!
//! Файл читается в память один раз при выборе и без изменений
//! отправляется и на предпросмотр, и на загрузку.

use contracts::usecases::u501_import_departments::{ImportFileKind, ACCEPTED_EXTENSIONS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Неподдерживаемый формат файла «{file_name}». Допустимые форматы: {}", ACCEPTED_EXTENSIONS.join(", "))]
pub struct UnsupportedFileType {
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub name: String,
    pub kind: ImportFileKind,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UnsupportedFileType> {
        let name = name.into();
        let kind = check_file_name(&name)?;
        Ok(Self { name, kind, bytes })
    }

    /// Размер для отображения: "12.50 KB"
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.bytes.len() as f64 / 1024.0)
    }
}

/// Проверка по расширению имени; вызывается до чтения содержимого
pub fn check_file_name(file_name: &str) -> Result<ImportFileKind, UnsupportedFileType> {
    ImportFileKind::from_file_name(file_name).ok_or_else(|| UnsupportedFileType {
        file_name: file_name.to_string(),
    })
}

/// Читает выбранный в браузере файл целиком
pub async fn read_browser_file(file: web_sys::File) -> Result<ImportFile, String> {
    use wasm_bindgen_futures::JsFuture;

    let name = file.name();
    check_file_name(&name).map_err(|e| e.to_string())?;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Ошибка чтения файла: {:?}", e))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    ImportFile::new(name, bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_spreadsheets() {
        for name in ["data.csv", "data.xlsx", "data.xls"] {
            let file = ImportFile::new(name, vec![1, 2, 3]).unwrap();
            assert_eq!(file.name, name);
            assert_eq!(file.bytes.len(), 3);
        }
    }

    #[test]
    fn test_new_rejects_pdf() {
        let err = ImportFile::new("data.pdf", Vec::new()).unwrap_err();
        assert_eq!(err.file_name, "data.pdf");
        let text = err.to_string();
        assert!(text.contains("data.pdf"));
        assert!(text.contains(".xlsx, .xls, .csv"));
    }

    #[test]
    fn test_size_label() {
        let file = ImportFile::new("a.csv", vec![0; 2048]).unwrap();
        assert_eq!(file.size_label(), "2.00 KB");
    }
}
