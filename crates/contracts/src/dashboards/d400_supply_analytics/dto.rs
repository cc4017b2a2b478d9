use serde::{Deserialize, Serialize};

/// One transaction-kind bucket; only kinds that occur in the data appear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: String,
    pub count: u64,
}

/// One transaction-status bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// One time bucket of the transaction trend
///
/// `bucket` is a UTC calendar date ("YYYY-MM-DD") for the daily series and
/// "YYYY-MM" for the monthly one. The series is sparse: buckets with zero
/// transactions are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub bucket: String,
    pub count: u64,
}

/// Mean sensor readings for one day, joined from logistics details to their
/// parent transaction's creation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalTrendPoint {
    /// UTC calendar date "YYYY-MM-DD"
    pub date: String,
    /// None when the bucket has details but none carries a reading
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
    /// Number of logistics details in the bucket
    pub samples: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalTrend {
    pub points: Vec<EnvironmentalTrendPoint>,
    /// Details whose parent transaction could not be resolved; excluded from
    /// the date buckets but never silently dropped
    pub unresolved: u64,
}

/// Full analytics payload, recomputed from scratch on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_transactions: u64,
    /// Count of distinct product references across all transactions
    pub distinct_products: u64,
    pub active_products: u64,
    pub unread_notifications: u64,
    /// None over an empty collection; never a NaN artifact
    pub mean_temperature: Option<f64>,
    pub mean_transit_hours: Option<f64>,
    /// Transit durations that did not parse and were skipped
    pub transit_samples_skipped: u64,
    pub by_kind: Vec<KindCount>,
    pub by_status: Vec<StatusCount>,
    pub daily_trend: Vec<TrendPoint>,
    pub monthly_trend: Vec<TrendPoint>,
    pub environmental: EnvironmentalTrend,
}
