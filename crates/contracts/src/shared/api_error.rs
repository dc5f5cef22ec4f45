use serde::{Deserialize, Serialize};

/// Тело ответа сервиса при ошибке: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    /// Разобрать тело ответа; `None`, если это не `{error}` или сообщение пустое
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|b| !b.error.trim().is_empty())
    }
}
