//! The running dashboard: data layer, active view, focus SKU and notices.

use stockwise_client::{ClientConfig, ResourceId, StockWiseClient, TrendQuery};
use tracing::{debug, info};

use super::ActiveView;
use crate::error::{AppError, AppResult};

/// One-shot message shown under the next render, then cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

impl From<AppError> for Notice {
    fn from(err: AppError) -> Self {
        Notice::Error(err.message)
    }
}

pub struct App {
    client: StockWiseClient,
    config: ClientConfig,
    view: ActiveView,
    /// SKU whose weekly trend the dashboard charts
    focus_sku: Option<String>,
    /// Last AI answer, shown on the advisor view
    advice: Option<String>,
    notice: Option<Notice>,
    running: bool,
}

impl App {
    /// Creates the app without mounting anything.
    pub fn new(client: StockWiseClient, config: ClientConfig, view: ActiveView) -> Self {
        let focus_sku = config.dashboard.trend_sku.clone();
        Self {
            client,
            config,
            view,
            focus_sku,
            advice: None,
            notice: None,
            running: true,
        }
    }

    /// Mounts the initial view.
    pub async fn start(&self) {
        info!(view = %self.view, "Mounting initial view");
        self.mount_current().await;
    }

    pub fn client(&self) -> &StockWiseClient {
        &self.client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn focus_sku(&self) -> Option<&str> {
        self.focus_sku.as_deref()
    }

    pub fn advice(&self) -> Option<&str> {
        self.advice.as_deref()
    }

    pub fn set_advice(&mut self, advice: String) {
        self.advice = Some(advice);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.client.dispose_all();
    }

    pub fn notify(&mut self, notice: impl Into<Notice>) {
        self.notice = Some(notice.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Info(message.into()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    /// Takes the pending notice, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Leaves the current view and mounts `next`.
    ///
    /// Switching to the view already showing does nothing.
    pub async fn switch_to(&mut self, next: ActiveView) {
        if next == self.view {
            return;
        }

        debug!(from = %self.view, to = %next, "Switching view");
        self.dispose_current();
        self.view = next;
        self.advice = None;
        self.mount_current().await;
    }

    /// Re-fetches every resource of the current view with its last parameters.
    pub async fn refresh_current(&self) {
        for id in self.view.resources() {
            match id {
                ResourceId::Catalog => {
                    self.client.catalog.refresh(None).await;
                }
                ResourceId::SalesTrend => {
                    self.client.trend.refresh(None).await;
                }
                ResourceId::Metrics => {
                    self.client.metrics.refresh(None).await;
                }
                ResourceId::Report => {
                    self.client.report.refresh(None).await;
                }
            }
        }
    }

    /// Points the dashboard trend at `skuid`.
    ///
    /// The next mount uses it too; when the dashboard is showing it is
    /// fetched right away.
    pub async fn set_focus(&mut self, skuid: String) {
        let query = TrendQuery::weekly(skuid.clone());
        self.client.trend.set_defaults(query.clone());
        self.focus_sku = Some(skuid);

        if self.client.trend.is_mounted() {
            self.client.trend.refresh(Some(query)).await;
        }
    }

    /// Resolves a SKU token: a 1-based row of the loaded catalog, or an id.
    pub fn resolve_sku(&self, token: &str) -> AppResult<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::validation("SKU is required"));
        }

        match token.parse::<usize>() {
            Ok(row) => {
                let catalog = self.client.catalog.state().value;
                row.checked_sub(1)
                    .and_then(|index| catalog.get(index))
                    .map(|sku| sku.skuid.clone())
                    .ok_or_else(|| {
                        AppError::validation(format!(
                            "No SKU at row {row}. Open the catalog view to list SKUs."
                        ))
                    })
            }
            Err(_) => Ok(token.to_string()),
        }
    }

    async fn mount_current(&self) {
        for id in self.view.resources() {
            match id {
                ResourceId::Catalog => {
                    self.client.catalog.mount().await;
                }
                ResourceId::SalesTrend => {
                    self.client.trend.mount().await;
                }
                ResourceId::Metrics => {
                    self.client.metrics.mount().await;
                }
                ResourceId::Report => {
                    self.client.report.mount().await;
                }
            }
        }
    }

    fn dispose_current(&self) {
        for id in self.view.resources() {
            match id {
                ResourceId::Catalog => self.client.catalog.dispose(),
                ResourceId::SalesTrend => self.client.trend.dispose(),
                ResourceId::Metrics => self.client.metrics.dispose(),
                ResourceId::Report => self.client.report.dispose(),
            }
        }
    }
}
