use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Идентификатор записи, выданный сервисом.
///
/// Клиент не разбирает его структуру: только хранит, сравнивает
/// и подставляет в путь запроса.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn as_string(&self) -> String;
}
