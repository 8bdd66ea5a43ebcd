//! Metric cards and the weekly sales trend of the focus SKU.

use std::fmt::Write;
use stockwise_core::money::group_thousands;
use stockwise_core::{DashboardMetrics, LowStockStatus, TrendPoint};

use super::status_line;
use crate::state::App;

/// Widest bar in the trend chart, in characters.
const BAR_WIDTH: u64 = 40;

pub(super) fn render(app: &App) -> String {
    let client = app.client();
    let mut out = String::new();

    let metrics = client.metrics.state();
    match status_line(&metrics, "metrics") {
        Some(line) => out.push_str(&line),
        None => out.push_str(&cards(&metrics.value)),
    }

    out.push('\n');
    out.push_str("Units Sold (Weekly Aggregation)");
    if let Some(sku) = app.focus_sku() {
        let _ = write!(out, " for {sku}");
    }
    out.push('\n');

    let trend = client.trend.state();
    match status_line(&trend, "sales trend") {
        Some(line) => out.push_str(&line),
        None => out.push_str(&chart(&trend.value)),
    }
    out
}

fn cards(metrics: &DashboardMetrics) -> String {
    let alert = match metrics.low_stock_status() {
        LowStockStatus::Alert => "  [ALERT]",
        LowStockStatus::Clear => "  [OK]",
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24}{}",
        "Total Active SKUs",
        group_thousands(metrics.total_active_skus)
    );
    let _ = writeln!(
        out,
        "{:<24}{}",
        "Total Stock Units",
        group_thousands(metrics.total_stock_count)
    );
    let _ = writeln!(
        out,
        "{:<24}{} USD",
        "Est. Inventory Value", metrics.total_inventory_value_estimated
    );
    let _ = writeln!(
        out,
        "{:<24}{}{}",
        "Low Stock Alerts",
        group_thousands(metrics.low_stock_items_count),
        alert
    );
    let _ = writeln!(
        out,
        "{:<24}{} USD",
        "Total Sales Revenue", metrics.total_sales_revenue
    );
    out
}

fn chart(series: &[TrendPoint]) -> String {
    if series.is_empty() {
        return "No historical sales data available to chart.\n".to_string();
    }

    let peak = series.iter().map(|p| p.quantity_sold).max().unwrap_or(0).max(1);
    let mut out = String::new();
    for point in series {
        let width = (point.quantity_sold * BAR_WIDTH).div_ceil(peak) as usize;
        let _ = writeln!(
            out,
            "{:<12} {:<width$} {}",
            point.period_end,
            "#".repeat(width),
            point.quantity_sold,
            width = BAR_WIDTH as usize
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActiveView;
    use crate::test_support::{app, StubBackend, SKU_ID};

    #[test]
    fn test_cards_show_alert_and_money() {
        let metrics = DashboardMetrics {
            total_active_skus: 1200,
            low_stock_items_count: 3,
            ..Default::default()
        };
        let out = cards(&metrics);
        assert!(out.contains("1,200"));
        assert!(out.contains("[ALERT]"));
        assert!(out.contains("$0.00 USD"));

        assert!(cards(&DashboardMetrics::default()).contains("[OK]"));
    }

    #[test]
    fn test_chart_scales_to_peak() {
        let series = vec![
            TrendPoint {
                period_end: "2025-11-02".into(),
                quantity_sold: 10,
            },
            TrendPoint {
                period_end: "2025-11-09".into(),
                quantity_sold: 5,
            },
        ];
        let out = chart(&series);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].matches('#').count(), 40);
        assert_eq!(lines[1].matches('#').count(), 20);
        assert!(lines[1].ends_with(" 5"));
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(chart(&[]), "No historical sales data available to chart.\n");
    }

    #[tokio::test]
    async fn test_dashboard_renders_error_inline() {
        let backend = StubBackend::healthy();
        backend.on("GET /dashboard/metrics", 500, "");
        let mut app = app(&backend, ActiveView::Dashboard);
        app.start().await;
        app.set_focus(SKU_ID.to_string()).await;

        let out = render(&app);
        assert!(out.contains("Error: Failed to load core metrics. Is the backend running?"));
        assert!(out.contains("2025-11-09"));
    }
}
