pub mod dto;

pub use dto::{
    AnalyticsSummary, EnvironmentalTrend, EnvironmentalTrendPoint, KindCount, StatusCount,
    TrendPoint,
};
