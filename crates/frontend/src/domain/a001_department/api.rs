//! Department API client
//!
//! `DepartmentApi` is the seam between the view-models and the remote
//! departments service; `HttpDepartmentApi` talks to it over `gloo-net`.

use super::import_file::ImportFile;
use crate::shared::api_utils::departments_url;
use contracts::domain::a001_department::aggregate::{Department, DepartmentDto, DepartmentId};
use contracts::domain::common::AggregateId;
use contracts::shared::api_error::ApiErrorBody;
use contracts::usecases::u501_import_departments::{ImportExecuteResponse, ImportPreviewResponse};
use gloo_net::http::{Request, Response};
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Multipart field the service reads the uploaded file from
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Запрос не дошёл до сервиса
    #[error("Сервер недоступен: {0}")]
    Network(String),

    /// Сервис вернул ошибку с телом `{error}`
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Неуспешный статус без читаемого тела
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),

    #[error("Ошибка формирования запроса: {0}")]
    Request(String),
}

impl ApiError {
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match ApiErrorBody::parse(body) {
            Some(body) => ApiError::Service {
                status,
                message: body.error,
            },
            None => ApiError::Status(status),
        }
    }

    /// Текст для пользователя: сообщение сервиса как есть, иначе `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Service { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Операции ресурса `/api/departments`
#[allow(async_fn_in_trait)]
pub trait DepartmentApi: Clone + 'static {
    async fn list(&self) -> Result<Vec<Department>, ApiError>;

    async fn create(&self, dto: &DepartmentDto) -> Result<Department, ApiError>;

    async fn update(&self, id: &DepartmentId, dto: &DepartmentDto) -> Result<Department, ApiError>;

    async fn delete(&self, id: &DepartmentId) -> Result<(), ApiError>;

    /// Выгрузка всех отделов в xlsx
    async fn export_excel(&self) -> Result<Vec<u8>, ApiError>;

    /// Пустой шаблон для импорта
    async fn import_template(&self) -> Result<Vec<u8>, ApiError>;

    /// Классификация строк файла без изменения данных
    async fn import_preview(&self, file: &ImportFile) -> Result<ImportPreviewResponse, ApiError>;

    /// Загрузка того же файла; сервис проверяет строки заново
    async fn import_execute(&self, file: &ImportFile) -> Result<ImportExecuteResponse, ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDepartmentApi;

fn item_url(id: &DepartmentId) -> String {
    departments_url(&format!("/{}", urlencoding::encode(&id.as_string())))
}

/// Transport errors become `Network`, non-2xx statuses are decoded from the body
async fn checked(sent: Result<Response, gloo_net::Error>) -> Result<Response, ApiError> {
    let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response_body(status, &body))
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn read_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn multipart(file: &ImportFile) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let properties = BlobPropertyBag::new();
    properties.set_type(file.kind.mime_type());
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;

    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;
    Ok(form)
}

async fn upload(url: &str, file: &ImportFile) -> Result<Response, ApiError> {
    let form = multipart(file)?;
    // Content-Type с boundary браузер выставит сам
    let request = Request::post(url)
        .body(form)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    checked(request.send().await).await
}

impl DepartmentApi for HttpDepartmentApi {
    async fn list(&self) -> Result<Vec<Department>, ApiError> {
        let response = checked(
            Request::get(&departments_url(""))
                .header("Accept", "application/json")
                .send()
                .await,
        )
        .await?;
        read_json(response).await
    }

    async fn create(&self, dto: &DepartmentDto) -> Result<Department, ApiError> {
        let request = Request::post(&departments_url(""))
            .json(dto)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = checked(request.send().await).await?;
        read_json(response).await
    }

    async fn update(&self, id: &DepartmentId, dto: &DepartmentDto) -> Result<Department, ApiError> {
        let request = Request::put(&item_url(id))
            .json(dto)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = checked(request.send().await).await?;
        read_json(response).await
    }

    async fn delete(&self, id: &DepartmentId) -> Result<(), ApiError> {
        checked(Request::delete(&item_url(id)).send().await).await?;
        Ok(())
    }

    async fn export_excel(&self) -> Result<Vec<u8>, ApiError> {
        let response = checked(Request::get(&departments_url("/export/excel")).send().await).await?;
        read_bytes(response).await
    }

    async fn import_template(&self) -> Result<Vec<u8>, ApiError> {
        let response =
            checked(Request::get(&departments_url("/import/template")).send().await).await?;
        read_bytes(response).await
    }

    async fn import_preview(&self, file: &ImportFile) -> Result<ImportPreviewResponse, ApiError> {
        let response = upload(&departments_url("/import/preview"), file).await?;
        read_json(response).await
    }

    async fn import_execute(&self, file: &ImportFile) -> Result<ImportExecuteResponse, ApiError> {
        let response = upload(&departments_url("/import/execute"), file).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_service_body() {
        let err = ApiError::from_response_body(409, r#"{"error":"Код HR уже занят"}"#);
        assert_eq!(
            err,
            ApiError::Service {
                status: 409,
                message: "Код HR уже занят".into()
            }
        );
        assert_eq!(err.user_message("Не удалось сохранить"), "Код HR уже занят");
    }

    #[test]
    fn test_error_without_body_uses_fallback() {
        let err = ApiError::from_response_body(500, "Internal Server Error");
        assert_eq!(err, ApiError::Status(500));
        assert_eq!(err.user_message("Не удалось сохранить"), "Не удалось сохранить");
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_network_error_uses_fallback() {
        let err = ApiError::Network("Failed to fetch".into());
        assert_eq!(err.user_message("Ошибка"), "Ошибка");
    }
}
