//! # Read Domains
//!
//! The four [`ResourceSpec`] implementations.
//!
//! ```text
//! ┌──────────────┬──────────────────┬─────────────────────────────────────────┐
//! │ Resource     │ Params           │ Request                                 │
//! ├──────────────┼──────────────────┼─────────────────────────────────────────┤
//! │ Catalog      │ CatalogQuery     │ GET /skus[?search=q]                    │
//! │ SalesTrend   │ TrendQuery       │ GET /skus/{id}/sales/summary?period=W   │
//! │ Metrics      │ ()               │ GET /dashboard/metrics                  │
//! │ Report       │ ()               │ GET /reports/summary                    │
//! └──────────────┴──────────────────┴─────────────────────────────────────────┘
//! ```

use stockwise_core::normalize::{
    normalize_catalog, normalize_metrics, normalize_report, normalize_trend,
};
use stockwise_core::validation::validate_sku_ref;
use stockwise_core::{
    AuditReport, CoreResult, DashboardMetrics, DateRange, Sku, TrendPeriod, TrendPoint,
};

use crate::resource::{Resource, ResourceId, ResourceSpec};
use crate::transport::ApiRequest;

// =============================================================================
// Catalog
// =============================================================================

/// Catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive match on name or id. Blank means "everything".
    pub search: Option<String>,
}

impl CatalogQuery {
    pub fn search(term: impl Into<String>) -> Self {
        let term = term.into();
        Self {
            search: Some(term).filter(|t| !t.trim().is_empty()),
        }
    }
}

pub struct CatalogSpec;

impl ResourceSpec for CatalogSpec {
    const ID: ResourceId = ResourceId::Catalog;
    type Value = Vec<Sku>;
    type Params = CatalogQuery;

    fn request(params: &CatalogQuery) -> Option<ApiRequest> {
        let request = ApiRequest::get("/skus");
        Some(match params.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => request.query("search", term),
            _ => request,
        })
    }

    fn normalize(body: &[u8]) -> CoreResult<Vec<Sku>> {
        normalize_catalog(body)
    }

    fn failure_message() -> &'static str {
        "Could not load SKU list. Check API connection."
    }
}

pub type CatalogResource = Resource<CatalogSpec>;

// =============================================================================
// Sales Trend
// =============================================================================

/// Which SKU's history to aggregate, and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendQuery {
    /// No SKU, or a malformed one, means an empty series and no request.
    pub sku_id: Option<String>,
    pub period: TrendPeriod,
    pub range: Option<DateRange>,
}

impl TrendQuery {
    /// Weekly trend for one SKU.
    pub fn weekly(sku_id: impl Into<String>) -> Self {
        Self {
            sku_id: Some(sku_id.into()),
            period: TrendPeriod::Weekly,
            range: None,
        }
    }
}

pub struct SalesTrendSpec;

impl ResourceSpec for SalesTrendSpec {
    const ID: ResourceId = ResourceId::SalesTrend;
    type Value = Vec<TrendPoint>;
    type Params = TrendQuery;

    fn request(params: &TrendQuery) -> Option<ApiRequest> {
        let sku_id = validate_sku_ref(params.sku_id.as_deref()).ok()?;

        let mut request = ApiRequest::get(format!("/skus/{}/sales/summary", sku_id))
            .query("period", params.period.code());

        if let Some(range) = params.range {
            request = request
                .query("start_date", range.start.format("%Y-%m-%d").to_string())
                .query("end_date", range.end.format("%Y-%m-%d").to_string());
        }

        Some(request)
    }

    fn normalize(body: &[u8]) -> CoreResult<Vec<TrendPoint>> {
        Ok(normalize_trend(body))
    }

    fn failure_message() -> &'static str {
        "Failed to load sales trends. Ensure the backend is running and data exists."
    }
}

pub type SalesTrendResource = Resource<SalesTrendSpec>;

// =============================================================================
// Metrics
// =============================================================================

pub struct MetricsSpec;

impl ResourceSpec for MetricsSpec {
    const ID: ResourceId = ResourceId::Metrics;
    type Value = DashboardMetrics;
    type Params = ();

    fn request(_: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get("/dashboard/metrics"))
    }

    fn normalize(body: &[u8]) -> CoreResult<DashboardMetrics> {
        normalize_metrics(body)
    }

    fn failure_message() -> &'static str {
        "Failed to load core metrics. Is the backend running?"
    }
}

pub type MetricsResource = Resource<MetricsSpec>;

// =============================================================================
// Report
// =============================================================================

pub struct ReportSpec;

impl ResourceSpec for ReportSpec {
    const ID: ResourceId = ResourceId::Report;
    type Value = AuditReport;
    type Params = ();

    fn request(_: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get("/reports/summary"))
    }

    fn normalize(body: &[u8]) -> CoreResult<AuditReport> {
        normalize_report(body)
    }

    fn failure_message() -> &'static str {
        "Could not load audit report. Check API connection."
    }
}

pub type ReportResource = Resource<ReportSpec>;
