use serde::{Deserialize, Serialize};

/// Источник данных для агрегата
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Запись создана через дашборд
    #[serde(rename = "web")]
    Web,
    /// Тестовые/демонстрационные данные
    #[serde(rename = "seed")]
    Seed,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Web => "web",
            Origin::Seed => "seed",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
