//! # Response Normalization
//!
//! Turns raw backend bodies into the snapshot each resource holds.
//!
//! ## Shapes Handled
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Resource     Wire shape                               On mismatch      │
//! │  ──────────   ──────────────────────────────────────   ──────────────   │
//! │  Catalog      [ {skuid, sku_name, ...}, ... ]          failure          │
//! │  Metrics      { total_active_skus, ... }  (flat)       failure          │
//! │  SalesTrend   { data: { sales_over_time: [ ... ] } }   EMPTY series     │
//! │  Report       { report_summary, metrics: { ... } }     failure          │
//! │                                                                         │
//! │  Missing metric fields and null values take the default snapshot's     │
//! │  value. Trend rows that cannot be read are skipped one by one.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: bytes in, value out.

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::types::{AuditReport, DashboardMetrics, Sku, TrendPoint};

fn parse_json(resource: &str, body: &[u8]) -> CoreResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| CoreError::normalization(resource, format!("invalid JSON: {}", e)))
}

// =============================================================================
// Catalog
// =============================================================================

/// Normalizes `GET /api/skus`. The body must be a JSON array of SKUs.
pub fn normalize_catalog(body: &[u8]) -> CoreResult<Vec<Sku>> {
    match parse_json("catalog", body)? {
        Value::Array(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                serde_json::from_value(row).map_err(|e| {
                    CoreError::normalization("catalog", format!("row {}: {}", i, e))
                })
            })
            .collect(),
        other => Err(CoreError::normalization(
            "catalog",
            format!("expected a JSON array, got {}", kind(&other)),
        )),
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Normalizes `GET /api/dashboard/metrics`. The body must be a flat object.
pub fn normalize_metrics(body: &[u8]) -> CoreResult<DashboardMetrics> {
    match parse_json("metrics", body)? {
        Value::Object(map) => metrics_from_object(map),
        other => Err(CoreError::normalization(
            "metrics",
            format!("expected a JSON object, got {}", kind(&other)),
        )),
    }
}

fn metrics_from_object(mut map: Map<String, Value>) -> CoreResult<DashboardMetrics> {
    map.retain(|_, v| !v.is_null());
    serde_json::from_value(Value::Object(map))
        .map_err(|e| CoreError::normalization("metrics", e.to_string()))
}

// =============================================================================
// Sales Trend
// =============================================================================

/// Normalizes `GET /api/skus/{id}/sales/summary`.
///
/// Never fails: a missing `data`, a missing `sales_over_time`, or a body that
/// is not JSON at all yields an empty series.
pub fn normalize_trend(body: &[u8]) -> Vec<TrendPoint> {
    let Ok(root) = serde_json::from_slice::<Value>(body) else {
        return Vec::new();
    };

    let Some(rows) = root
        .get("data")
        .and_then(|d| d.get("sales_over_time"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    rows.iter().filter_map(trend_point).collect()
}

fn trend_point(row: &Value) -> Option<TrendPoint> {
    let period_end = match row.get("period_end")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let quantity = row.get("quantity_sold")?;
    let quantity_sold = match quantity.as_u64() {
        Some(q) => q,
        // pandas aggregates may arrive as 12.0
        None => {
            let q = quantity.as_f64()?;
            if q < 0.0 || q.fract() != 0.0 || !q.is_finite() {
                return None;
            }
            q as u64
        }
    };

    Some(TrendPoint {
        period_end,
        quantity_sold,
    })
}

// =============================================================================
// Report
// =============================================================================

/// Normalizes `GET /api/reports/summary`. The body must be an object;
/// a missing or non-object `metrics` falls back to the default snapshot.
pub fn normalize_report(body: &[u8]) -> CoreResult<AuditReport> {
    let mut root = match parse_json("report", body)? {
        Value::Object(map) => map,
        other => {
            return Err(CoreError::normalization(
                "report",
                format!("expected a JSON object, got {}", kind(&other)),
            ))
        }
    };

    let report_summary = match root.remove("report_summary") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };

    let metrics = match root.remove("metrics") {
        Some(Value::Object(map)) => metrics_from_object(map)?,
        _ => DashboardMetrics::default(),
    };

    Ok(AuditReport {
        report_summary,
        metrics,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
