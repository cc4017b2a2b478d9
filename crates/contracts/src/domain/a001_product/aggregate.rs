use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Discontinued => "discontinued",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            "discontinued" => Some(ProductStatus::Discontinued),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    /// Складской артикул, бизнес-ключ товара
    #[serde(rename = "sku")]
    pub sku: String,

    #[serde(rename = "fullDescription", default)]
    pub full_description: String,

    #[serde(rename = "category", default)]
    pub category: String,

    #[serde(rename = "status")]
    pub status: ProductStatus,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "extra")]
    pub extra: Option<serde_json::Value>,
}

impl Product {
    pub fn new_for_insert(
        code: String,
        description: String,
        sku: String,
        full_description: String,
        category: String,
        status: ProductStatus,
        created_by: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProductId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            sku,
            full_description,
            category,
            status,
            created_by,
            extra: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ProductDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.sku = dto.sku.clone().unwrap_or_default();
        self.full_description = dto.full_description.clone().unwrap_or_default();
        self.category = dto.category.clone().unwrap_or_default();
        if let Some(status) = dto.status {
            self.status = status;
        }
        if dto.extra.is_some() {
            self.extra = dto.extra.clone();
        }
        // created_by назначается один раз при создании
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if self.sku.trim().is_empty() {
            return Err("SKU cannot be empty".into());
        }
        if self.sku.len() > 64 {
            return Err("SKU must not exceed 64 characters".into());
        }
        if self.category.len() > 80 {
            return Err("Category must not exceed 80 characters".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub sku: Option<String>,
    #[serde(rename = "fullDescription")]
    pub full_description: Option<String>,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub comment: Option<String>,
    pub extra: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            ProductStatus::Active,
            ProductStatus::Inactive,
            ProductStatus::Discontinued,
        ] {
            assert_eq!(ProductStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProductStatus::parse("archived"), None);
    }

    #[test]
    fn validate_rejects_blank_sku() {
        let product = Product::new_for_insert(
            "PRD-1".into(),
            "Olive oil".into(),
            "  ".into(),
            String::new(),
            "food".into(),
            ProductStatus::Active,
            None,
            None,
        );
        assert!(product.validate().is_err());
    }
}
