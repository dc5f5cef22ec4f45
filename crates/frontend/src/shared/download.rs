//! Скачивание бинарных файлов, полученных от сервиса (xlsx и т.п.)
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Файл, готовый к отдаче пользователю
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadFile {
    pub fn xlsx(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: XLSX_MIME,
            bytes,
        }
    }
}

/// Имя файла выгрузки с датой: `departments_2024-03-15.xlsx`
pub fn dated_file_name(prefix: &str, date: chrono::NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}

/// Отдаёт файл браузеру через временную ссылку
pub fn save_file(file: &DownloadFile) -> Result<(), String> {
    let blob = create_blob(&file.bytes, file.mime)?;
    download_blob(&blob, &file.file_name)
}

fn create_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(browser_error("не удалось подготовить данные файла"))
}

/// Временная ссылка `<a download>`: добавить, кликнуть, убрать
fn download_blob(blob: &Blob, file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "Страница недоступна для скачивания".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "Страница недоступна для скачивания".to_string())?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(browser_error("не удалось создать ссылку на файл"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(browser_error("не удалось создать ссылку"))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(browser_error("не удалось скрыть ссылку"))?;

    body.append_child(&anchor)
        .map_err(browser_error("не удалось добавить ссылку"))?;
    anchor.click();
    let cleanup = body
        .remove_child(&anchor)
        .map(|_| ())
        .map_err(browser_error("не удалось убрать ссылку"));

    Url::revoke_object_url(&url).map_err(browser_error("не удалось освободить ссылку"))?;
    cleanup
}

/// Ошибка браузерного API в виде сообщения для лога: "<что делали>: <деталь>"
fn browser_error<E: std::fmt::Debug>(action: &'static str) -> impl Fn(E) -> String {
    move |e| format!("Скачивание: {action}: {e:?}")
}
