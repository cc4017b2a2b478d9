use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogisticsDetailId(pub Uuid);

impl LogisticsDetailId {
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

impl AggregateId for LogisticsDetailId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LogisticsDetailId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Условия перевозки/хранения для одной транзакции.
///
/// Одна запись на транзакцию (по соглашению, уникальность в БД
/// не навязывается схемой).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsDetail {
    #[serde(flatten)]
    pub base: BaseAggregate<LogisticsDetailId>,

    #[serde(rename = "transactionId")]
    pub transaction_id: String,

    /// Температура, °C
    #[serde(rename = "temperature")]
    pub temperature: Option<f64>,

    /// Влажность, %
    #[serde(rename = "humidity")]
    pub humidity: Option<f64>,

    #[serde(rename = "transportVehicle")]
    pub transport_vehicle: Option<String>,

    /// Свободный текст, например "2 hours"
    #[serde(rename = "transportDuration")]
    pub transport_duration: Option<String>,

    #[serde(rename = "storageConditions")]
    pub storage_conditions: Option<String>,

    #[serde(rename = "qualityChecks")]
    pub quality_checks: Option<serde_json::Value>,

    #[serde(rename = "additionalData")]
    pub additional_data: Option<serde_json::Value>,
}

impl LogisticsDetail {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        transaction_id: String,
        temperature: Option<f64>,
        humidity: Option<f64>,
        transport_vehicle: Option<String>,
        transport_duration: Option<String>,
        storage_conditions: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let description = transport_vehicle.clone().unwrap_or_else(|| "logistics".into());
        let mut base = BaseAggregate::new(LogisticsDetailId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            transaction_id,
            temperature,
            humidity,
            transport_vehicle,
            transport_duration,
            storage_conditions,
            quality_checks: None,
            additional_data: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &LogisticsDetailDto) {
        self.base.comment = dto.comment.clone();
        self.temperature = dto.temperature;
        self.humidity = dto.humidity;
        self.transport_vehicle = dto.transport_vehicle.clone();
        if let Some(vehicle) = &self.transport_vehicle {
            self.base.description = vehicle.clone();
        }
        self.transport_duration = dto.transport_duration.clone();
        self.storage_conditions = dto.storage_conditions.clone();
        if dto.quality_checks.is_some() {
            self.quality_checks = dto.quality_checks.clone();
        }
        if dto.additional_data.is_some() {
            self.additional_data = dto.additional_data.clone();
        }
        // transaction_id не меняется после создания
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.transaction_id.trim().is_empty() {
            return Err("Transaction reference cannot be empty".into());
        }
        if Uuid::parse_str(&self.transaction_id).is_err() {
            return Err("Transaction reference is not a valid UUID".into());
        }
        if let Some(t) = self.temperature {
            if !(-273.15..=200.0).contains(&t) {
                return Err("Temperature is out of range".into());
            }
        }
        if let Some(h) = self.humidity {
            if !(0.0..=100.0).contains(&h) {
                return Err("Humidity must be between 0 and 100".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for LogisticsDetail {
    type Id = LogisticsDetailId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "logistics_detail"
    }

    fn element_name() -> &'static str {
        "Logistics detail"
    }

    fn list_name() -> &'static str {
        "Logistics details"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogisticsDetailDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "transactionId")]
    pub transaction_id: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "transportVehicle")]
    pub transport_vehicle: Option<String>,
    #[serde(rename = "transportDuration")]
    pub transport_duration: Option<String>,
    #[serde(rename = "storageConditions")]
    pub storage_conditions: Option<String>,
    #[serde(rename = "qualityChecks")]
    pub quality_checks: Option<serde_json::Value>,
    #[serde(rename = "additionalData")]
    pub additional_data: Option<serde_json::Value>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_humidity_above_hundred() {
        let detail = LogisticsDetail::new_for_insert(
            "LGD-1".into(),
            Uuid::new_v4().to_string(),
            Some(4.0),
            Some(140.0),
            Some("Refrigerated truck".into()),
            Some("2 hours".into()),
            None,
            None,
        );
        assert!(detail.validate().is_err());
    }
}
