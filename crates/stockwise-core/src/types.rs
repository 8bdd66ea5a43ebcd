//! # Domain Types
//!
//! Core domain types exchanged with the StockWise backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  READ (snapshots)                                                       │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │      Sku        │   │ DashboardMetrics │   │  AuditReport    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  skuid (UUID)   │   │  totals (Money)  │   │  report_summary │      │
//! │  │  sku_name       │   │  low_stock_*     │   │  metrics ───────┼──┐   │
//! │  │  stock level    │   │  threshold (50)  │◄──┼─────────────────┘  │   │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘  │   │
//! │                                                                     │   │
//! │  ┌─────────────────┐   ┌──────────────────┐                         │   │
//! │  │   TrendPoint    │   │   HealthStatus   │                         │   │
//! │  │  period_end     │   │  status, db      │                         │   │
//! │  │  quantity_sold  │   │  sku_count       │                         │   │
//! │  └─────────────────┘   └──────────────────┘                         │   │
//! │                                                                         │
//! │  WRITE (payloads)                                                       │
//! │  NewSku, SkuDetailsUpdate, StockUpdate, SaleDraft ──► SaleRecord       │
//! │  ReorderRequest, ScenarioRequest                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Snapshots are owned by exactly one resource and replaced wholesale on
//! every fetch. Nothing here is mutated in place by the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_LOW_STOCK_THRESHOLD;

// =============================================================================
// SKU
// =============================================================================

/// A stock-keeping unit as listed by `GET /api/skus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    /// Opaque backend identifier (a UUID string).
    pub skuid: String,

    /// Display name.
    pub sku_name: String,

    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Unit of measure ("units", "kg", "boxes", ...).
    #[serde(default)]
    pub unit_of_measure: String,

    /// Units currently on hand.
    #[serde(default)]
    pub current_stock_level: u64,
}

/// Payload for `POST /api/skus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSku {
    pub sku_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_description: Option<String>,

    pub unit_of_measure: String,

    #[serde(default)]
    pub initial_stock_level: u64,
}

impl NewSku {
    /// Creates a payload with no description and zero opening stock.
    pub fn new(sku_name: impl Into<String>, unit_of_measure: impl Into<String>) -> Self {
        Self {
            sku_name: sku_name.into(),
            sku_description: None,
            unit_of_measure: unit_of_measure.into(),
            initial_stock_level: 0,
        }
    }
}

/// Response of a successful create: `{message, sku_id}`.
///
/// Both fields may be absent; an empty `sku_id` means the backend did not
/// echo the new id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuCreated {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sku_id: String,
}

/// Payload for `PUT /api/skus/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuDetailsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
}

impl SkuDetailsUpdate {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.sku_name.is_none() && self.sku_description.is_none() && self.unit_of_measure.is_none()
    }
}

/// Payload for `PATCH /api/skus/{id}/stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub new_stock_level: u64,
}

/// Generic `{message}` acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Sales
// =============================================================================

/// Unvalidated sale input, as typed by the user.
///
/// Turned into a [`SaleRecord`] by [`crate::validation::validate_sale`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    /// SKU reference carried over from the catalog selection.
    pub skuid: Option<String>,
    pub quantity_sold: u64,
    pub selling_price: Money,
    pub sale_date: NaiveDate,
}

/// Validated payload for `POST /api/sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub skuid: String,
    pub quantity_sold: u64,
    pub selling_price: Money,
    /// Serialized as `YYYY-MM-DD`.
    pub sale_date: NaiveDate,
}

/// Response of a recorded sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sale_id: Option<String>,
    #[serde(default)]
    pub new_stock: Option<i64>,
}

// =============================================================================
// Metrics
// =============================================================================

/// Dashboard metrics snapshot from `GET /api/dashboard/metrics`.
///
/// Every field is optional on the wire; missing fields take the default
/// snapshot's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardMetrics {
    pub total_active_skus: u64,
    pub total_stock_count: u64,
    pub total_inventory_value_estimated: Money,
    pub low_stock_items_count: u64,
    pub total_sales_revenue: Money,
    pub low_stock_threshold_units: u64,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            total_active_skus: 0,
            total_stock_count: 0,
            total_inventory_value_estimated: Money::zero(),
            low_stock_items_count: 0,
            total_sales_revenue: Money::zero(),
            low_stock_threshold_units: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl DashboardMetrics {
    /// Derived low-stock indicator.
    pub fn low_stock_status(&self) -> LowStockStatus {
        if self.low_stock_items_count > 0 {
            LowStockStatus::Alert
        } else {
            LowStockStatus::Clear
        }
    }
}

/// Low-stock indicator shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowStockStatus {
    /// At least one SKU is under the threshold.
    Alert,
    /// Nothing under the threshold.
    Clear,
}

impl fmt::Display for LowStockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowStockStatus::Alert => write!(f, "ALERT"),
            LowStockStatus::Clear => write!(f, "OK"),
        }
    }
}

// =============================================================================
// Sales Trend
// =============================================================================

/// One bucket of the sales trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Period-end label as sent by the backend (e.g. `2025-11-09`).
    pub period_end: String,
    pub quantity_sold: u64,
}

/// Aggregation granularity accepted by the sales summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrendPeriod {
    #[serde(rename = "D")]
    Daily,
    #[default]
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

impl TrendPeriod {
    /// Query-string code.
    pub fn code(&self) -> &'static str {
        match self {
            TrendPeriod::Daily => "D",
            TrendPeriod::Weekly => "W",
            TrendPeriod::Monthly => "M",
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendPeriod::Daily => write!(f, "daily"),
            TrendPeriod::Weekly => write!(f, "weekly"),
            TrendPeriod::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for TrendPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "daily" => Ok(TrendPeriod::Daily),
            "w" | "weekly" => Ok(TrendPeriod::Weekly),
            "m" | "monthly" => Ok(TrendPeriod::Monthly),
            other => Err(ValidationError::InvalidFormat {
                field: "period".to_string(),
                reason: format!("unknown period '{}'", other),
            }),
        }
    }
}

/// Inclusive date filter for the sales summary. Both ends are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidFormat {
                field: "date range".to_string(),
                reason: format!("{} is after {}", start, end),
            });
        }
        Ok(Self { start, end })
    }
}

// =============================================================================
// Audit Report
// =============================================================================

/// Audit report from `GET /api/reports/summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub report_summary: String,

    #[serde(default)]
    pub metrics: DashboardMetrics,
}

impl AuditReport {
    /// True when the backend produced no summary text.
    pub fn is_empty(&self) -> bool {
        self.report_summary.trim().is_empty()
    }
}

/// Download format for the report export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Text,
}

impl ReportFormat {
    /// File extension and `format=` query value.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Text => "txt",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "txt" | "text" => Ok(ReportFormat::Text),
            other => Err(ValidationError::InvalidFormat {
                field: "format".to_string(),
                reason: format!("unsupported export format '{}'", other),
            }),
        }
    }
}

// =============================================================================
// AI Advisory
// =============================================================================

/// Default supplier lead time in days.
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Default safety stock in units.
pub const DEFAULT_SAFETY_STOCK_UNITS: u32 = 50;

/// Payload for `POST /api/skus/{id}/recommendation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub lead_time: u32,
    pub safety_stock: u32,
}

impl Default for ReorderRequest {
    fn default() -> Self {
        Self {
            lead_time: DEFAULT_LEAD_TIME_DAYS,
            safety_stock: DEFAULT_SAFETY_STOCK_UNITS,
        }
    }
}

/// Payload for `POST /api/skus/{id}/whatif`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub scenario_description: String,
}

// =============================================================================
// Health
// =============================================================================

/// Backend liveness from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub database_status: String,

    #[serde(default)]
    pub sku_count: Option<u64>,
}

impl HealthStatus {
    /// True when the backend reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_missing_fields_take_defaults() {
        let m: DashboardMetrics =
            serde_json::from_str(r#"{"total_active_skus": 12, "total_sales_revenue": 950.75}"#)
                .unwrap();
        assert_eq!(m.total_active_skus, 12);
        assert_eq!(m.total_sales_revenue.cents(), 95075);
        assert_eq!(m.low_stock_items_count, 0);
        assert_eq!(m.low_stock_threshold_units, 50);
    }

    #[test]
    fn test_low_stock_status() {
        let mut m = DashboardMetrics::default();
        assert_eq!(m.low_stock_status(), LowStockStatus::Clear);
        m.low_stock_items_count = 1;
        assert_eq!(m.low_stock_status(), LowStockStatus::Alert);
        assert_eq!(m.low_stock_status().to_string(), "ALERT");
    }

    #[test]
    fn test_sale_record_wire_shape() {
        let record = SaleRecord {
            skuid: "54a1c574-4605-4b20-b2ae-65746d4517ff".to_string(),
            quantity_sold: 3,
            selling_price: Money::from_cents(1250),
            sale_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["selling_price"], serde_json::json!(12.5));
        assert_eq!(json["sale_date"], "2025-11-01");
        assert_eq!(json["quantity_sold"], 3);
    }

    #[test]
    fn test_details_update_skips_absent_fields() {
        let update = SkuDetailsUpdate {
            sku_name: Some("Widget".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"sku_name":"Widget"}"#
        );
        assert!(SkuDetailsUpdate::default().is_empty());
    }

    #[test]
    fn test_sku_tolerates_null_description() {
        let sku: Sku = serde_json::from_str(
            r#"{"skuid":"a","sku_name":"Bolt","description":null,"unit_of_measure":"box","current_stock_level":4}"#,
        )
        .unwrap();
        assert_eq!(sku.description, None);
        assert_eq!(sku.current_stock_level, 4);
    }

    #[test]
    fn test_period_and_format_parsing() {
        assert_eq!("w".parse::<TrendPeriod>().unwrap(), TrendPeriod::Weekly);
        assert_eq!("Monthly".parse::<TrendPeriod>().unwrap().code(), "M");
        assert!("y".parse::<TrendPeriod>().is_err());
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_date_range_order() {
        let a = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(DateRange::new(a, b).is_ok());
        assert!(DateRange::new(b, a).is_err());
    }

    #[test]
    fn test_reorder_defaults() {
        let req = ReorderRequest::default();
        assert_eq!((req.lead_time, req.safety_stock), (7, 50));
    }
}
