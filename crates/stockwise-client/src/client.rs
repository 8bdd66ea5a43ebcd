//! # Data Layer
//!
//! Wires one instance of every resource to the mutations that invalidate
//! them, sharing a single [`Api`] handle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          StockWiseClient                                │
//! │                                                                         │
//! │   catalog ◄──────┐                                                      │
//! │   metrics ◄──────┼── Mutations (invalidation by ResourceId)            │
//! │   trend          │                                                      │
//! │   report         │                                                      │
//! │                  │                                                      │
//! │   exporter ──────┴── Api ──► Arc<dyn Backend>                           │
//! │   advisor  ─────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use stockwise_core::HealthStatus;

use crate::advisory::Advisor;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::export::ReportExporter;
use crate::mutation::Mutations;
use crate::resource::Refreshable;
use crate::resources::{
    CatalogResource, MetricsResource, ReportResource, SalesTrendResource, TrendQuery,
};
use crate::transport::{Api, Backend, HttpBackend};

/// Everything a view needs to read and write StockWise data.
pub struct StockWiseClient {
    api: Api,
    pub catalog: Arc<CatalogResource>,
    pub trend: Arc<SalesTrendResource>,
    pub metrics: Arc<MetricsResource>,
    pub report: Arc<ReportResource>,
    pub mutations: Mutations,
    pub exporter: ReportExporter,
    pub advisor: Advisor,
}

impl StockWiseClient {
    /// Builds the data layer against the real backend.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let backend = HttpBackend::new(&config.api)?;
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Builds the data layer over any backend.
    pub fn with_backend(backend: Arc<dyn Backend>, config: &ClientConfig) -> Self {
        let api = Api::new(backend);

        let trend_defaults = config
            .dashboard
            .trend_sku
            .as_deref()
            .map(TrendQuery::weekly)
            .unwrap_or_default();

        let catalog = Arc::new(CatalogResource::new(api.clone()));
        let trend = Arc::new(SalesTrendResource::with_defaults(api.clone(), trend_defaults));
        let metrics = Arc::new(MetricsResource::new(api.clone()));
        let report = Arc::new(ReportResource::new(api.clone()));

        let invalidatable: Vec<Arc<dyn Refreshable>> = vec![
            catalog.clone(),
            trend.clone(),
            metrics.clone(),
            report.clone(),
        ];

        Self {
            mutations: Mutations::new(api.clone(), invalidatable),
            exporter: ReportExporter::new(api.clone(), config.export.directory.clone()),
            advisor: Advisor::new(api.clone()),
            api,
            catalog,
            trend,
            metrics,
            report,
        }
    }

    /// `GET /health`.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.api.health().await
    }

    /// Disposes every resource.
    pub fn dispose_all(&self) {
        self.catalog.dispose();
        self.trend.dispose();
        self.metrics.dispose();
        self.report.dispose();
    }
}
