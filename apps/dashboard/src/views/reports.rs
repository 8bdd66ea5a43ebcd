//! Audit report metrics.

use std::fmt::Write;
use stockwise_core::money::group_thousands;
use stockwise_core::{AuditReport, Money};

use crate::state::App;

const EMPTY_REPORT: &str = "Report data is currently empty. Please ensure SKUs and Sales data \
exist in the system and try refreshing the page.";

pub(super) fn render(app: &App) -> String {
    let state = app.client().report.state();

    if state.is_loading {
        return "Loading report...\n".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Error loading report: {error}\n");
    }
    body(&state.value)
}

fn body(report: &AuditReport) -> String {
    if report.is_empty() {
        return format!("{EMPTY_REPORT}\n");
    }

    let m = &report.metrics;
    let mut out = String::new();
    row(&mut out, "total_active_skus", group_thousands(m.total_active_skus));
    row(&mut out, "total_stock_count", group_thousands(m.total_stock_count));
    money_row(&mut out, "total_inventory_value_estimated", m.total_inventory_value_estimated);
    row(&mut out, "low_stock_items_count", group_thousands(m.low_stock_items_count));
    money_row(&mut out, "total_sales_revenue", m.total_sales_revenue);

    out.push('\n');
    out.push_str(report.report_summary.trim_end());
    out.push_str("\n\nexport [csv|text]\n");
    out
}

/// `total_stock_count` is shown as `TOTAL STOCK COUNT`.
fn label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

fn row(out: &mut String, key: &str, value: String) {
    let _ = writeln!(out, "{:<34}{}", label(key), value);
}

fn money_row(out: &mut String, key: &str, value: Money) {
    let _ = writeln!(out, "{:<34}{} USD", label(key), value);
}
