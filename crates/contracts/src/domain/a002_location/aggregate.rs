use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
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

impl AggregateId for LocationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LocationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Location Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Warehouse,
    DistributionCenter,
    Retail,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Warehouse => "warehouse",
            LocationType::DistributionCenter => "distribution_center",
            LocationType::Retail => "retail",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "warehouse" => Some(LocationType::Warehouse),
            "distribution_center" => Some(LocationType::DistributionCenter),
            "retail" => Some(LocationType::Retail),
            _ => None,
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub base: BaseAggregate<LocationId>,

    #[serde(rename = "address")]
    pub address: String,

    #[serde(rename = "locationType")]
    pub location_type: LocationType,

    /// Географические координаты (широта/долгота)
    #[serde(rename = "latitude")]
    pub latitude: Option<f64>,

    #[serde(rename = "longitude")]
    pub longitude: Option<f64>,

    #[serde(rename = "extra")]
    pub extra: Option<serde_json::Value>,
}

impl Location {
    pub fn new_for_insert(
        code: String,
        description: String,
        address: String,
        location_type: LocationType,
        latitude: Option<f64>,
        longitude: Option<f64>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(LocationId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            address,
            location_type,
            latitude,
            longitude,
            extra: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &LocationDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.address = dto.address.clone().unwrap_or_default();
        if let Some(location_type) = dto.location_type {
            self.location_type = location_type;
        }
        self.latitude = dto.latitude;
        self.longitude = dto.longitude;
        if dto.extra.is_some() {
            self.extra = dto.extra.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if self.address.trim().is_empty() {
            return Err("Address cannot be empty".into());
        }
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err("Latitude must be between -90 and 90".into());
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err("Longitude must be between -180 and 180".into());
            }
        }
        // Координаты задаются парой
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err("Latitude and longitude must be set together".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Location {
    type Id = LocationId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "location"
    }

    fn element_name() -> &'static str {
        "Location"
    }

    fn list_name() -> &'static str {
        "Locations"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub address: Option<String>,
    #[serde(rename = "locationType")]
    pub location_type: Option<LocationType>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub comment: Option<String>,
    pub extra: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_type_round_trip() {
        for lt in [
            LocationType::Warehouse,
            LocationType::DistributionCenter,
            LocationType::Retail,
        ] {
            assert_eq!(LocationType::parse(lt.as_str()), Some(lt));
        }
        assert_eq!(LocationType::parse("harbor"), None);
    }

    #[test]
    fn validate_rejects_unpaired_coordinates() {
        let mut location = Location::new_for_insert(
            "LOC-1".into(),
            "Main warehouse".into(),
            "12 Dock Rd".into(),
            LocationType::Warehouse,
            Some(51.5),
            Some(-0.1),
            None,
        );
        assert!(location.validate().is_ok());

        location.longitude = None;
        assert!(location.validate().is_err());
    }
}
