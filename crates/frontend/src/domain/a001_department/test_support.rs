//! Recording `DepartmentApi` for view-model tests

use super::api::{ApiError, DepartmentApi};
use super::import_file::ImportFile;
use contracts::domain::a001_department::aggregate::{Department, DepartmentDto, DepartmentId};
use contracts::usecases::u501_import_departments::{
    ImportExecuteResponse, ImportPreviewResponse, ImportResults,
};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(DepartmentDto),
    Update(DepartmentId, DepartmentDto),
    Delete(DepartmentId),
    ExportExcel,
    ImportTemplate,
    ImportPreview(String),
    ImportExecute(String),
}

struct Inner {
    calls: Vec<Call>,
    departments: Vec<Department>,
    list_error: Option<ApiError>,
    save_error: Option<ApiError>,
    delete_error: Option<ApiError>,
    export: Result<Vec<u8>, ApiError>,
    template: Result<Vec<u8>, ApiError>,
    preview: Result<ImportPreviewResponse, ApiError>,
    preview_pending: bool,
    execute: Result<ImportExecuteResponse, ApiError>,
}

#[derive(Clone)]
pub struct MockApi(Rc<RefCell<Inner>>);

pub fn department(id: &str, name: &str, code: Option<&str>) -> Department {
    Department {
        id: DepartmentId::new(id),
        name: name.to_string(),
        code: code.map(str::to_string),
        location: None,
        manager_name: None,
        phone: None,
        employee_count: 0,
    }
}

/// `{summary:{total:3,valid:1,updates:1,invalid:1}, ...}`
pub fn preview_fixture() -> ImportPreviewResponse {
    serde_json::from_str(
        r#"{
            "summary": {"total": 3, "valid": 1, "updates": 1, "invalid": 1},
            "valid": [{"name": "IT"}],
            "updates": [{"code": "HR", "name": "Human Resources"}],
            "invalid": [{"row": 4, "name": "", "errors": ["name required"]}]
        }"#,
    )
    .expect("fixture is valid JSON")
}

pub fn empty_preview() -> ImportPreviewResponse {
    serde_json::from_str(
        r#"{
            "summary": {"total": 1, "valid": 0, "updates": 0, "invalid": 1},
            "invalid": [{"row": 2, "name": "", "errors": ["name required"]}]
        }"#,
    )
    .expect("fixture is valid JSON")
}

pub fn service_error(message: &str) -> ApiError {
    ApiError::Service {
        status: 400,
        message: message.to_string(),
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Inner {
            calls: Vec::new(),
            departments: Vec::new(),
            list_error: None,
            save_error: None,
            delete_error: None,
            export: Ok(vec![0x50, 0x4b, 0x03, 0x04]),
            template: Ok(vec![0x50, 0x4b]),
            preview: Ok(preview_fixture()),
            preview_pending: false,
            execute: Ok(ImportExecuteResponse {
                message: "Импорт завершён".to_string(),
                results: ImportResults {
                    inserted: 1,
                    updated: 1,
                    skipped: 1,
                },
            }),
        })))
    }

    pub fn with_departments(self, departments: Vec<Department>) -> Self {
        self.0.borrow_mut().departments = departments;
        self
    }

    pub fn set_departments(&self, departments: Vec<Department>) {
        self.0.borrow_mut().departments = departments;
    }

    pub fn fail_list(&self, error: ApiError) {
        self.0.borrow_mut().list_error = Some(error);
    }

    pub fn fail_save(&self, error: ApiError) {
        self.0.borrow_mut().save_error = Some(error);
    }

    pub fn fail_delete(&self, error: ApiError) {
        self.0.borrow_mut().delete_error = Some(error);
    }

    pub fn export_returns(&self, result: Result<Vec<u8>, ApiError>) {
        self.0.borrow_mut().export = result;
    }

    pub fn template_returns(&self, result: Result<Vec<u8>, ApiError>) {
        self.0.borrow_mut().template = result;
    }

    pub fn preview_returns(&self, result: Result<ImportPreviewResponse, ApiError>) {
        self.0.borrow_mut().preview = result;
    }

    /// Предпросмотр отвечает не сразу, а после одного возврата `Pending`
    pub fn preview_stays_pending_once(&self) {
        self.0.borrow_mut().preview_pending = true;
    }

    pub fn execute_returns(&self, result: Result<ImportExecuteResponse, ApiError>) {
        self.0.borrow_mut().execute = result;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

impl DepartmentApi for MockApi {
    async fn list(&self) -> Result<Vec<Department>, ApiError> {
        self.record(Call::List);
        let inner = self.0.borrow();
        match &inner.list_error {
            Some(e) => Err(e.clone()),
            None => Ok(inner.departments.clone()),
        }
    }

    async fn create(&self, dto: &DepartmentDto) -> Result<Department, ApiError> {
        self.record(Call::Create(dto.clone()));
        if let Some(e) = self.0.borrow().save_error.clone() {
            return Err(e);
        }
        let mut created = department("new", &dto.name, dto.code.as_deref());
        created.location = dto.location.clone();
        Ok(created)
    }

    async fn update(&self, id: &DepartmentId, dto: &DepartmentDto) -> Result<Department, ApiError> {
        self.record(Call::Update(id.clone(), dto.clone()));
        if let Some(e) = self.0.borrow().save_error.clone() {
            return Err(e);
        }
        Ok(department(id.value(), &dto.name, dto.code.as_deref()))
    }

    async fn delete(&self, id: &DepartmentId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.clone()));
        match self.0.borrow().delete_error.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn export_excel(&self) -> Result<Vec<u8>, ApiError> {
        self.record(Call::ExportExcel);
        self.0.borrow().export.clone()
    }

    async fn import_template(&self) -> Result<Vec<u8>, ApiError> {
        self.record(Call::ImportTemplate);
        self.0.borrow().template.clone()
    }

    async fn import_preview(&self, file: &ImportFile) -> Result<ImportPreviewResponse, ApiError> {
        self.record(Call::ImportPreview(file.name.clone()));
        let pending = self.0.borrow().preview_pending;
        if pending {
            YieldOnce(false).await;
        }
        self.0.borrow().preview.clone()
    }

    async fn import_execute(&self, file: &ImportFile) -> Result<ImportExecuteResponse, ApiError> {
        self.record(Call::ImportExecute(file.name.clone()));
        self.0.borrow().execute.clone()
    }
}

/// Future, который один раз отдаёт управление исполнителю
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
