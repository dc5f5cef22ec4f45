use crate::domain::common::AggregateId;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор отдела.
///
/// Назначается сервисом и для клиента непрозрачен: на проводе встречается
/// и строкой, и числом, поэтому внутри всегда хранится текстом.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DepartmentId(pub String);

impl DepartmentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DepartmentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

impl AggregateId for DepartmentId {
    fn as_string(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Отдел в том виде, в каком его отдаёт сервис
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,

    #[serde(default, deserialize_with = "text_or_null")]
    pub name: String,

    /// Короткий код, по нему сервис сопоставляет строки импорта
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default, alias = "manager")]
    pub manager_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Вычисляется сервисом, клиент только отображает.
    /// Приходит числом, строкой с числом или `null`.
    #[serde(default, alias = "employeeCount", deserialize_with = "lenient_count")]
    pub employee_count: u32,
}

/// `null` читается как пустая строка
fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Счётчик: число, строка с числом или `null` (= 0)
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    let value = match raw {
        None => return Ok(0),
        Some(Raw::Unsigned(n)) => n,
        Some(Raw::Signed(n)) => u64::try_from(n).map_err(D::Error::custom)?,
        Some(Raw::Float(f)) if f >= 0.0 && f.fract() == 0.0 => f as u64,
        Some(Raw::Float(f)) => {
            return Err(D::Error::custom(format!("некорректное число сотрудников: {f}")))
        }
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0
            } else {
                trimmed.parse::<u64>().map_err(|_| {
                    D::Error::custom(format!("некорректное число сотрудников: {s:?}"))
                })?
            }
        }
    };
    u32::try_from(value).map_err(D::Error::custom)
}

impl Department {
    pub fn list_name() -> &'static str {
        "Отделы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления отдела
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DepartmentDto {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl DepartmentDto {
    /// Обрезать пробелы, пустые необязательные поля превратить в `None`
    pub fn normalized(&self) -> Self {
        fn opt(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            name: self.name.trim().to_string(),
            code: opt(&self.code),
            location: opt(&self.location),
            manager_name: opt(&self.manager_name),
            phone: opt(&self.phone),
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Название отдела обязательно для заполнения".into());
        }
        Ok(())
    }
}

impl From<&Department> for DepartmentDto {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            code: d.code.clone(),
            location: d.location.clone(),
            manager_name: d.manager_name.clone(),
            phone: d.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_number_and_string() {
        let from_number: DepartmentId = serde_json::from_str("42").unwrap();
        let from_text: DepartmentId = serde_json::from_str("\"a-17\"").unwrap();
        assert_eq!(from_number, DepartmentId::new("42"));
        assert_eq!(from_text.value(), "a-17");
    }

    #[test]
    fn test_id_path_text() {
        assert_eq!(DepartmentId::new("7").as_string(), "7");
    }

    #[test]
    fn test_department_deserialize_with_aliases() {
        let json = r#"{
            "id": 3,
            "name": "Бухгалтерия",
            "code": "ACC",
            "manager": "Иванова",
            "employeeCount": 12
        }"#;
        let d: Department = serde_json::from_str(json).unwrap();
        assert_eq!(d.id.as_string(), "3");
        assert_eq!(d.manager_name.as_deref(), Some("Иванова"));
        assert_eq!(d.employee_count, 12);
        assert_eq!(d.location, None);
    }

    #[test]
    fn test_department_without_count_defaults_to_zero() {
        let d: Department = serde_json::from_str(r#"{"id":"x","name":"IT"}"#).unwrap();
        assert_eq!(d.employee_count, 0);
        assert_eq!(d.code, None);
    }

    #[test]
    fn test_null_and_text_fields_are_tolerated() {
        let json = r#"[
            {"id": 1, "name": "IT", "employee_count": null},
            {"id": 2, "name": "HR", "employee_count": "3"},
            {"id": 3, "name": null, "employeeCount": " 12 "},
            {"id": 4, "name": "Склад", "employee_count": 5.0},
            {"id": 5, "name": "Архив", "employee_count": ""}
        ]"#;
        let list: Vec<Department> = serde_json::from_str(json).unwrap();
        let counts: Vec<u32> = list.iter().map(|d| d.employee_count).collect();
        assert_eq!(counts, vec![0, 3, 12, 5, 0]);
        assert_eq!(list[2].name, "");
    }

    #[test]
    fn test_garbage_count_is_rejected() {
        for bad in [r#""три""#, "-1", "2.5"] {
            let json = format!(r#"{{"id": 1, "name": "IT", "employee_count": {bad}}}"#);
            assert!(serde_json::from_str::<Department>(&json).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_validate_requires_name() {
        let mut dto = DepartmentDto::default();
        assert!(dto.validate().is_err());
        dto.name = "   ".into();
        assert!(dto.validate().is_err());
        dto.name = "Склад".into();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_normalized_drops_blank_optionals() {
        let dto = DepartmentDto {
            name: "  IT ".into(),
            code: Some(" IT-01 ".into()),
            location: Some("   ".into()),
            manager_name: None,
            phone: Some(String::new()),
        };
        let n = dto.normalized();
        assert_eq!(n.name, "IT");
        assert_eq!(n.code.as_deref(), Some("IT-01"));
        assert_eq!(n.location, None);
        assert_eq!(n.phone, None);

        let body = serde_json::to_value(&n).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "IT", "code": "IT-01" }));
    }

    #[test]
    fn test_dto_from_department() {
        let d = Department {
            id: DepartmentId::new("1"),
            name: "HR".into(),
            code: Some("HR".into()),
            location: Some("2 этаж".into()),
            manager_name: None,
            phone: Some("+7 495 000-00-00".into()),
            employee_count: 4,
        };
        let dto = DepartmentDto::from(&d);
        assert_eq!(dto.name, "HR");
        assert_eq!(dto.location.as_deref(), Some("2 этаж"));
        assert_eq!(dto.phone.as_deref(), Some("+7 495 000-00-00"));
    }
}
