use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
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

impl AggregateId for ReportId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ReportId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Frequency
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ReportFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFrequency::Daily => "daily",
            ReportFrequency::Weekly => "weekly",
            ReportFrequency::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(ReportFrequency::Daily),
            "weekly" => Some(ReportFrequency::Weekly),
            "monthly" => Some(ReportFrequency::Monthly),
            _ => None,
        }
    }

    /// Фиксированные интервалы, month считается как 30 дней
    pub fn interval(&self) -> Duration {
        match self {
            ReportFrequency::Daily => Duration::days(1),
            ReportFrequency::Weekly => Duration::days(7),
            ReportFrequency::Monthly => Duration::days(30),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub base: BaseAggregate<ReportId>,

    /// Предметная область отчёта, например "supply_chain" или "inventory"
    #[serde(rename = "kind")]
    pub kind: String,

    #[serde(rename = "frequency")]
    pub frequency: ReportFrequency,

    #[serde(rename = "lastRun")]
    pub last_run: Option<DateTime<Utc>>,

    #[serde(rename = "nextRun")]
    pub next_run: Option<DateTime<Utc>>,

    #[serde(rename = "status", default)]
    pub status: String,

    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,

    #[serde(rename = "extra")]
    pub extra: Option<serde_json::Value>,
}

impl Report {
    pub fn new_for_insert(
        code: String,
        name: String,
        kind: String,
        frequency: ReportFrequency,
        created_by: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ReportId::new_v4(), code, name);
        base.comment = comment;

        Self {
            base,
            kind,
            frequency,
            last_run: None,
            next_run: None,
            status: "active".into(),
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

    /// Отметить запуск отчёта и запланировать следующий по частоте
    pub fn mark_run(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(now);
        self.next_run = Some(now + self.frequency.interval());
        self.base.touch();
    }

    pub fn update(&mut self, dto: &ReportDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.kind = dto.kind.clone().unwrap_or_default();
        if let Some(frequency) = dto.frequency {
            self.frequency = frequency;
        }
        if let Some(status) = &dto.status {
            self.status = status.clone();
        }
        if dto.extra.is_some() {
            self.extra = dto.extra.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if self.kind.trim().is_empty() {
            return Err("Report kind cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Report {
    type Id = ReportId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "report"
    }

    fn element_name() -> &'static str {
        "Report"
    }

    fn list_name() -> &'static str {
        "Reports"
    }

    fn origin() -> Origin {
        Origin::Web
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportDto {
    pub id: Option<String>,
    pub code: Option<String>,
    /// Название отчёта
    pub description: String,
    pub kind: Option<String>,
    pub frequency: Option<ReportFrequency>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub extra: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_run_schedules_next_by_frequency() {
        let mut report = Report::new_for_insert(
            "RPT-1".into(),
            "Monthly supply chain".into(),
            "supply_chain".into(),
            ReportFrequency::Monthly,
            None,
            None,
        );
        let now = Utc::now();
        report.mark_run(now);

        assert_eq!(report.last_run, Some(now));
        assert_eq!(report.next_run, Some(now + Duration::days(30)));
    }

    #[test]
    fn frequency_intervals() {
        assert_eq!(ReportFrequency::Daily.interval(), Duration::days(1));
        assert_eq!(ReportFrequency::Weekly.interval(), Duration::days(7));
        assert_eq!(ReportFrequency::Monthly.interval(), Duration::days(30));
    }
}
