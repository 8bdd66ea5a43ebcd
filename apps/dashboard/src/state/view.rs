//! Active view and the resources each view mounts.

use std::fmt;
use std::str::FromStr;
use stockwise_client::ResourceId;

use crate::error::AppError;

/// Which screen is showing. Exactly one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Catalog,
    Advisor,
    Reports,
    Settings,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Dashboard,
        ActiveView::Catalog,
        ActiveView::Advisor,
        ActiveView::Reports,
        ActiveView::Settings,
    ];

    /// Resources mounted while this view is active.
    pub fn resources(&self) -> &'static [ResourceId] {
        match self {
            ActiveView::Dashboard => &[ResourceId::Metrics, ResourceId::SalesTrend],
            ActiveView::Catalog => &[ResourceId::Catalog],
            ActiveView::Advisor => &[ResourceId::Catalog],
            ActiveView::Reports => &[ResourceId::Report],
            ActiveView::Settings => &[],
        }
    }

    /// Heading shown above the view.
    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Dashboard => "Dashboard",
            ActiveView::Catalog => "SKU Management",
            ActiveView::Advisor => "AI Forecasting",
            ActiveView::Reports => "Audit & Reports",
            ActiveView::Settings => "Settings",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveView::Dashboard => write!(f, "dashboard"),
            ActiveView::Catalog => write!(f, "catalog"),
            ActiveView::Advisor => write!(f, "advisor"),
            ActiveView::Reports => write!(f, "reports"),
            ActiveView::Settings => write!(f, "settings"),
        }
    }
}

impl FromStr for ActiveView {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Ok(ActiveView::Dashboard),
            "catalog" | "skus" | "sku" => Ok(ActiveView::Catalog),
            "advisor" | "ai" | "forecast" => Ok(ActiveView::Advisor),
            "reports" | "report" | "audit" => Ok(ActiveView::Reports),
            "settings" | "config" => Ok(ActiveView::Settings),
            other => Err(AppError::usage(format!(
                "Unknown view '{}'. Views: dashboard, catalog, advisor, reports, settings",
                other
            ))),
        }
    }
}
