use std::collections::{BTreeMap, HashMap, HashSet};

use contracts::dashboards::d400_supply_analytics::{
    AnalyticsSummary, EnvironmentalTrend, EnvironmentalTrendPoint, KindCount, StatusCount,
    TrendPoint,
};
use contracts::domain::a003_supply_transaction::SupplyTransaction;
use contracts::domain::a004_logistics_detail::LogisticsDetail;

use super::repository;
use crate::shared::error::AppError;

/// Assemble the dashboard payload from fresh snapshots.
///
/// No caching and no incremental state: every request recomputes over the
/// full transaction and logistics tables.
pub async fn get_summary() -> Result<AnalyticsSummary, AppError> {
    let transactions = repository::fetch_transactions().await?;
    let details = repository::fetch_logistics_details().await?;
    let active_products = repository::count_active_products().await?;
    let unread_notifications = repository::count_unread_notifications().await?;

    let (mean_transit, transit_skipped) = mean_transit_hours(&details);
    let mean_transit = ensure_finite("mean transit hours", mean_transit)?;
    let mean_temp = ensure_finite("mean temperature", mean_temperature(&details))?;

    Ok(AnalyticsSummary {
        total_transactions: transactions.len() as u64,
        distinct_products: count_distinct_products(&transactions),
        active_products,
        unread_notifications,
        mean_temperature: mean_temp,
        mean_transit_hours: mean_transit,
        transit_samples_skipped: transit_skipped,
        by_kind: count_by_kind(&transactions),
        by_status: count_by_status(&transactions),
        daily_trend: trend_by_day(&transactions),
        monthly_trend: trend_by_month(&transactions),
        environmental: environmental_trend_by_day(&details, &transactions),
    })
}

/// Count transactions per kind. Only kinds present in the input appear;
/// the counts sum to the input length.
pub fn count_by_kind(transactions: &[SupplyTransaction]) -> Vec<KindCount> {
    let mut buckets: BTreeMap<&'static str, u64> = BTreeMap::new();
    for txn in transactions {
        *buckets.entry(txn.kind.as_str()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(kind, count)| KindCount {
            kind: kind.to_string(),
            count,
        })
        .collect()
}

pub fn count_by_status(transactions: &[SupplyTransaction]) -> Vec<StatusCount> {
    let mut buckets: BTreeMap<&'static str, u64> = BTreeMap::new();
    for txn in transactions {
        *buckets.entry(txn.status.as_str()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

/// Number of distinct product references across the snapshot
pub fn count_distinct_products(transactions: &[SupplyTransaction]) -> u64 {
    let products: HashSet<&str> = transactions.iter().map(|t| t.product_id.as_str()).collect();
    products.len() as u64
}

/// Sparse daily series, ordered by UTC calendar date.
/// Days without transactions are omitted, as in the source data feed.
pub fn trend_by_day(transactions: &[SupplyTransaction]) -> Vec<TrendPoint> {
    trend_by_bucket(transactions, "%Y-%m-%d")
}

/// Sparse monthly series with "YYYY-MM" buckets
pub fn trend_by_month(transactions: &[SupplyTransaction]) -> Vec<TrendPoint> {
    trend_by_bucket(transactions, "%Y-%m")
}

fn trend_by_bucket(transactions: &[SupplyTransaction], format: &str) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for txn in transactions {
        let bucket = txn.base.metadata.created_at.format(format).to_string();
        *buckets.entry(bucket).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(bucket, count)| TrendPoint { bucket, count })
        .collect()
}

/// Join each logistics detail to its parent transaction's creation date and
/// average the sensor readings per day.
///
/// A detail whose parent transaction is missing from the snapshot goes into
/// the `unresolved` counter instead of a date bucket.
pub fn environmental_trend_by_day(
    details: &[LogisticsDetail],
    transactions: &[SupplyTransaction],
) -> EnvironmentalTrend {
    let dates_by_txn: HashMap<String, String> = transactions
        .iter()
        .map(|t| {
            (
                t.to_string_id(),
                t.base.metadata.created_at.format("%Y-%m-%d").to_string(),
            )
        })
        .collect();

    struct Bucket {
        temperatures: Vec<f64>,
        humidities: Vec<f64>,
        samples: u64,
    }

    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut unresolved = 0u64;

    for detail in details {
        let Some(date) = dates_by_txn.get(detail.transaction_id.as_str()) else {
            unresolved += 1;
            continue;
        };
        let bucket = buckets.entry(date.clone()).or_insert_with(|| Bucket {
            temperatures: Vec::new(),
            humidities: Vec::new(),
            samples: 0,
        });
        bucket.samples += 1;
        if let Some(t) = detail.temperature {
            bucket.temperatures.push(t);
        }
        if let Some(h) = detail.humidity {
            bucket.humidities.push(h);
        }
    }

    let points = buckets
        .into_iter()
        .map(|(date, bucket)| EnvironmentalTrendPoint {
            date,
            mean_temperature: mean(&bucket.temperatures),
            mean_humidity: mean(&bucket.humidities),
            samples: bucket.samples,
        })
        .collect();

    EnvironmentalTrend { points, unresolved }
}

/// Mean temperature across all details; None when no readings exist
pub fn mean_temperature(details: &[LogisticsDetail]) -> Option<f64> {
    let values: Vec<f64> = details.iter().filter_map(|d| d.temperature).collect();
    mean(&values)
}

/// Mean transit duration in hours.
///
/// Durations are free text ("2 hours"); the leading unsigned integer is
/// taken. Entries that carry a duration that does not parse are skipped and
/// counted, never folded into the mean as a garbage value.
pub fn mean_transit_hours(details: &[LogisticsDetail]) -> (Option<f64>, u64) {
    let mut values = Vec::new();
    let mut skipped = 0u64;
    for detail in details {
        let Some(raw) = detail.transport_duration.as_deref() else {
            continue;
        };
        match parse_leading_hours(raw) {
            Some(hours) => values.push(hours),
            None => skipped += 1,
        }
    }
    (mean(&values), skipped)
}

/// Leading unsigned integer of a free-text duration: "2 hours" -> 2.0
pub fn parse_leading_hours(raw: &str) -> Option<f64> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok().map(|v| v as f64)
}

/// None over an empty slice, so no division-by-zero NaN leaks out
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Corrupt readings in the store (NaN/inf REAL values) would otherwise
/// poison a mean silently; surface them as a computation failure instead.
fn ensure_finite(label: &str, value: Option<f64>) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if !v.is_finite() => Err(AppError::computation(format!(
            "{} is not a finite number",
            label
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use contracts::domain::a003_supply_transaction::{TransactionKind, TransactionStatus};

    fn txn(product: &str, kind: TransactionKind, created_at: DateTime<Utc>) -> SupplyTransaction {
        let mut t = SupplyTransaction::new_for_insert(
            "TRX-test".into(),
            product.to_string(),
            kind,
            None,
            None,
            TransactionStatus::Pending,
            "0xfeed".into(),
            None,
            "user-1".into(),
        );
        t.base.metadata.created_at = created_at;
        t
    }

    fn detail(
        transaction_id: &str,
        temperature: Option<f64>,
        humidity: Option<f64>,
        duration: Option<&str>,
    ) -> LogisticsDetail {
        LogisticsDetail::new_for_insert(
            "LGD-test".into(),
            transaction_id.to_string(),
            temperature,
            humidity,
            None,
            duration.map(Into::into),
            None,
            None,
        )
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn count_by_kind_sums_to_input_length() {
        let txns = vec![
            txn("p1", TransactionKind::Production, at(2024, 1, 1)),
            txn("p1", TransactionKind::Transport, at(2024, 1, 2)),
            txn("p2", TransactionKind::Transport, at(2024, 1, 3)),
            txn("p2", TransactionKind::Delivery, at(2024, 1, 4)),
        ];
        let counts = count_by_kind(&txns);

        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, txns.len() as u64);

        // Every observed kind appears exactly once; storage never occurred
        let kinds: Vec<&str> = counts.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["delivery", "production", "transport"]);
        assert!(counts.iter().all(|c| c.count > 0));
    }

    #[test]
    fn distinct_products_counted_once() {
        let txns = vec![
            txn("p1", TransactionKind::Production, at(2024, 1, 1)),
            txn("p1", TransactionKind::Transport, at(2024, 1, 2)),
            txn("p2", TransactionKind::Production, at(2024, 1, 3)),
        ];
        assert_eq!(count_distinct_products(&txns), 2);
        assert_eq!(count_distinct_products(&[]), 0);
    }

    #[test]
    fn trend_by_day_is_sparse_and_ordered() {
        let txns = vec![
            txn("p1", TransactionKind::Production, at(2024, 1, 3)),
            txn("p1", TransactionKind::Transport, at(2024, 1, 1)),
            txn("p2", TransactionKind::Delivery, at(2024, 1, 1)),
        ];
        let trend = trend_by_day(&txns);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    bucket: "2024-01-01".into(),
                    count: 2
                },
                // 2024-01-02 has no transactions and no bucket
                TrendPoint {
                    bucket: "2024-01-03".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn trend_by_day_idempotent_under_regrouping() {
        let txns = vec![
            txn("p1", TransactionKind::Production, at(2024, 2, 1)),
            txn("p1", TransactionKind::Transport, at(2024, 2, 1)),
            txn("p2", TransactionKind::Delivery, at(2024, 2, 5)),
        ];
        let first = trend_by_day(&txns);

        // Reshape the output back into one transaction per counted unit
        let synthetic: Vec<SupplyTransaction> = first
            .iter()
            .flat_map(|point| {
                let date = format!("{}T00:00:00Z", point.bucket);
                let created: DateTime<Utc> = date.parse().unwrap();
                (0..point.count)
                    .map(move |_| txn("p", TransactionKind::Storage, created))
                    .collect::<Vec<_>>()
            })
            .collect();
        let second = trend_by_day(&synthetic);

        let first_counts: Vec<(String, u64)> =
            first.into_iter().map(|p| (p.bucket, p.count)).collect();
        let second_counts: Vec<(String, u64)> =
            second.into_iter().map(|p| (p.bucket, p.count)).collect();
        assert_eq!(first_counts, second_counts);
    }

    #[test]
    fn monthly_trend_buckets_by_month() {
        let txns = vec![
            txn("p1", TransactionKind::Production, at(2024, 1, 3)),
            txn("p1", TransactionKind::Transport, at(2024, 1, 28)),
            txn("p1", TransactionKind::Delivery, at(2024, 3, 1)),
        ];
        let trend = trend_by_month(&txns);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    bucket: "2024-01".into(),
                    count: 2
                },
                TrendPoint {
                    bucket: "2024-03".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn environmental_trend_means_per_day() {
        let t1 = txn("p1", TransactionKind::Transport, at(2024, 1, 1));
        let t2 = txn("p1", TransactionKind::Transport, at(2024, 1, 1));
        let details = vec![
            detail(&t1.to_string_id(), Some(20.0), Some(40.0), None),
            detail(&t2.to_string_id(), Some(24.0), Some(50.0), None),
        ];
        let trend = environmental_trend_by_day(&details, &[t1, t2]);

        assert_eq!(trend.unresolved, 0);
        assert_eq!(trend.points.len(), 1);
        let point = &trend.points[0];
        assert_eq!(point.date, "2024-01-01");
        assert_eq!(point.mean_temperature, Some(22.0));
        assert_eq!(point.mean_humidity, Some(45.0));
        assert_eq!(point.samples, 2);
    }

    #[test]
    fn environmental_trend_counts_unresolved_parents() {
        let t1 = txn("p1", TransactionKind::Transport, at(2024, 1, 1));
        let details = vec![
            detail(&t1.to_string_id(), Some(10.0), None, None),
            detail("not-a-known-transaction", Some(99.0), Some(99.0), None),
        ];
        let trend = environmental_trend_by_day(&details, &[t1]);

        assert_eq!(trend.unresolved, 1);
        assert_eq!(trend.points.len(), 1);
        // The orphan reading never leaks into a bucket
        assert_eq!(trend.points[0].mean_temperature, Some(10.0));
        assert_eq!(trend.points[0].mean_humidity, None);
    }

    #[test]
    fn mean_temperature_empty_is_none() {
        assert_eq!(mean_temperature(&[]), None);

        // Details without readings do not fabricate a mean either
        let details = vec![detail("t", None, None, None)];
        assert_eq!(mean_temperature(&details), None);
    }

    #[test]
    fn mean_transit_hours_skips_unparseable() {
        let details = vec![
            detail("t1", None, None, Some("2 hours")),
            detail("t2", None, None, Some("5 hours")),
            detail("t3", None, None, Some("not a number")),
        ];
        let (mean, skipped) = mean_transit_hours(&details);
        assert_eq!(mean, Some(3.5));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn mean_transit_hours_none_when_nothing_parses() {
        let details = vec![detail("t1", None, None, Some("soon"))];
        let (mean, skipped) = mean_transit_hours(&details);
        assert_eq!(mean, None);
        assert_eq!(skipped, 1);

        // Absent durations are not "unparseable"
        let (mean, skipped) = mean_transit_hours(&[detail("t2", None, None, None)]);
        assert_eq!(mean, None);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn ensure_finite_rejects_nan_means() {
        assert!(ensure_finite("x", Some(f64::NAN)).is_err());
        assert_eq!(ensure_finite("x", Some(3.5)).unwrap(), Some(3.5));
        assert_eq!(ensure_finite("x", None).unwrap(), None);
    }

    #[test]
    fn parse_leading_hours_cases() {
        assert_eq!(parse_leading_hours("2 hours"), Some(2.0));
        assert_eq!(parse_leading_hours("  36h"), Some(36.0));
        assert_eq!(parse_leading_hours("half a day"), None);
        assert_eq!(parse_leading_hours(""), None);
    }
}
