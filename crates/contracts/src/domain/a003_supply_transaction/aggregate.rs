use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplyTransactionId(pub Uuid);

impl SupplyTransactionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for SupplyTransactionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplyTransactionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Kind / Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Production,
    Transport,
    Storage,
    Delivery,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Production => "production",
            TransactionKind::Transport => "transport",
            TransactionKind::Storage => "storage",
            TransactionKind::Delivery => "delivery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "production" => Some(TransactionKind::Production),
            "transport" => Some(TransactionKind::Transport),
            "storage" => Some(TransactionKind::Storage),
            "delivery" => Some(TransactionKind::Delivery),
            _ => None,
        }
    }

    /// Production начинает цепочку поставки товара
    pub fn starts_lineage(&self) -> bool {
        matches!(self, TransactionKind::Production)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::InProgress => "in_progress",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "in_progress" => Some(TransactionStatus::InProgress),
            "completed" => Some(TransactionStatus::Completed),
            "failed" => Some(TransactionStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyTransaction {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplyTransactionId>,

    #[serde(rename = "productId")]
    pub product_id: String,

    #[serde(rename = "kind")]
    pub kind: TransactionKind,

    #[serde(rename = "fromLocationId")]
    pub from_location_id: Option<String>,

    #[serde(rename = "toLocationId")]
    pub to_location_id: Option<String>,

    #[serde(rename = "status")]
    pub status: TransactionStatus,

    /// Непрозрачный hex-токен записи. Не является проверяемым дайджестом.
    #[serde(rename = "chainHash")]
    pub chain_hash: String,

    /// Ссылка на предыдущую транзакцию этого же товара (голова цепочки на
    /// момент создания). Пустая для production.
    #[serde(rename = "previousTransactionId")]
    pub previous_transaction_id: Option<String>,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "extra")]
    pub extra: Option<serde_json::Value>,
}

impl SupplyTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        product_id: String,
        kind: TransactionKind,
        from_location_id: Option<String>,
        to_location_id: Option<String>,
        status: TransactionStatus,
        chain_hash: String,
        previous_transaction_id: Option<String>,
        created_by: String,
    ) -> Self {
        let description = format!("{} movement", kind.as_str());
        let base = BaseAggregate::new(SupplyTransactionId::new_v4(), code, description);

        Self {
            base,
            product_id,
            kind,
            from_location_id,
            to_location_id,
            status,
            chain_hash,
            previous_transaction_id,
            created_by: Some(created_by),
            extra: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Статус является единственным изменяемым бизнес-полем: записи цепочки
    /// не перепривязываются после создания.
    pub fn set_status(&mut self, status: TransactionStatus) {
        self.status = status;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.trim().is_empty() {
            return Err("Product reference cannot be empty".into());
        }
        if Uuid::parse_str(&self.product_id).is_err() {
            return Err("Product reference is not a valid UUID".into());
        }
        if self.chain_hash.trim().is_empty() {
            return Err("Chain hash cannot be empty".into());
        }
        if self.kind.starts_lineage() {
            // Production открывает цепочку: без происхождения и без ссылки назад
            if self.from_location_id.is_some() {
                return Err("Production transaction cannot have a from-location".into());
            }
            if self.previous_transaction_id.is_some() {
                return Err("Production transaction cannot link to a predecessor".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for SupplyTransaction {
    type Id = SupplyTransactionId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "supply_transaction"
    }

    fn element_name() -> &'static str {
        "Supply transaction"
    }

    fn list_name() -> &'static str {
        "Supply transactions"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Запрос на добавление транзакции в цепочку товара.
///
/// previous_transaction_id и chain_hash намеренно отсутствуют:
/// их назначает сервер при вставке.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendTransactionDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub kind: TransactionKind,
    #[serde(rename = "fromLocationId")]
    pub from_location_id: Option<String>,
    #[serde(rename = "toLocationId")]
    pub to_location_id: Option<String>,
    pub status: Option<TransactionStatus>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusDto {
    pub status: TransactionStatus,
}

/// Строка списка транзакций с разрешёнными ссылками.
///
/// Отсутствующий join представлен явным None, а не вложенным объектом.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionWithJoins {
    pub id: String,
    pub code: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    #[serde(rename = "chainHash")]
    pub chain_hash: String,
    #[serde(rename = "previousTransactionId")]
    pub previous_transaction_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    #[serde(rename = "productSku")]
    pub product_sku: Option<String>,
    #[serde(rename = "fromLocationName")]
    pub from_location_name: Option<String>,
    #[serde(rename = "toLocationName")]
    pub to_location_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_status_round_trip() {
        for kind in [
            TransactionKind::Production,
            TransactionKind::Transport,
            TransactionKind::Storage,
            TransactionKind::Delivery,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
        }
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::InProgress,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransactionKind::parse("return"), None);
    }

    #[test]
    fn production_with_predecessor_fails_validation() {
        let mut txn = SupplyTransaction::new_for_insert(
            "TRX-1".into(),
            Uuid::new_v4().to_string(),
            TransactionKind::Production,
            None,
            None,
            TransactionStatus::Pending,
            "0xabc".into(),
            None,
            "user-1".into(),
        );
        assert!(txn.validate().is_ok());

        txn.previous_transaction_id = Some(Uuid::new_v4().to_string());
        assert!(txn.validate().is_err());
    }

    #[test]
    fn production_with_origin_fails_validation() {
        let txn = SupplyTransaction::new_for_insert(
            "TRX-2".into(),
            Uuid::new_v4().to_string(),
            TransactionKind::Production,
            Some(Uuid::new_v4().to_string()),
            None,
            TransactionStatus::Pending,
            "0xabc".into(),
            None,
            "user-1".into(),
        );
        assert!(txn.validate().is_err());
    }
}
