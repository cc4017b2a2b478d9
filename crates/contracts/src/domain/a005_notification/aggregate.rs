use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
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

impl AggregateId for NotificationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(NotificationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Kind / Status
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(NotificationKind::Info),
            "success" => Some(NotificationKind::Success),
            "warning" => Some(NotificationKind::Warning),
            "error" => Some(NotificationKind::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Unread => "unread",
            NotificationStatus::Read => "read",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(NotificationStatus::Unread),
            "read" => Some(NotificationStatus::Read),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(flatten)]
    pub base: BaseAggregate<NotificationId>,

    #[serde(rename = "userId")]
    pub user_id: String,

    #[serde(rename = "message")]
    pub message: String,

    #[serde(rename = "kind")]
    pub kind: NotificationKind,

    #[serde(rename = "status")]
    pub status: NotificationStatus,
}

impl Notification {
    pub fn new_for_insert(
        code: String,
        user_id: String,
        title: String,
        message: String,
        kind: NotificationKind,
    ) -> Self {
        let base = BaseAggregate::new(NotificationId::new_v4(), code, title);

        Self {
            base,
            user_id,
            message,
            kind,
            status: NotificationStatus::Unread,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn mark_read(&mut self) {
        self.status = NotificationStatus::Read;
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("User reference cannot be empty".into());
        }
        if self.base.description.trim().is_empty() {
            return Err("Title cannot be empty".into());
        }
        if self.message.trim().is_empty() {
            return Err("Message cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Notification {
    type Id = NotificationId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "notification"
    }

    fn element_name() -> &'static str {
        "Notification"
    }

    fn list_name() -> &'static str {
        "Notifications"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationDto {
    pub id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Заголовок уведомления
    pub title: String,
    pub message: String,
    pub kind: Option<NotificationKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_starts_unread() {
        let mut n = Notification::new_for_insert(
            "NTF-1".into(),
            "user-1".into(),
            "Shipment delayed".into(),
            "Transport TRX-12 is running late".into(),
            NotificationKind::Warning,
        );
        assert_eq!(n.status, NotificationStatus::Unread);

        n.mark_read();
        assert_eq!(n.status, NotificationStatus::Read);
    }
}
