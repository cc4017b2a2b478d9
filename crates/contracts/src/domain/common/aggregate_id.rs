/// Трейт для типизированных идентификаторов агрегатов
///
/// Все ID хранятся в БД как строки (UUID в текстовой форме).
pub trait AggregateId: Sized {
    /// Строковое представление для БД и API
    fn as_string(&self) -> String;

    /// Разбор из строкового представления
    fn from_string(s: &str) -> Result<Self, String>;
}
