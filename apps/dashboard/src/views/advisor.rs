//! AI forecasting: SKU picker plus the last recommendation or analysis.

use std::fmt::Write;

use super::status_line;
use crate::state::App;

pub(super) fn render(app: &App) -> String {
    let state = app.client().catalog.state();
    let mut out = String::new();

    if let Some(line) = status_line(&state, "SKUs") {
        out.push_str(&line);
        return out;
    }

    if state.value.is_empty() {
        out.push_str(
            "No products found. Please add an SKU in the SKU Management view before using AI tools.\n",
        );
        return out;
    }

    for (index, sku) in state.value.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {} (Stock: {})",
            index + 1,
            sku.sku_name,
            sku.current_stock_level
        );
    }
    out.push_str("\nrecommend <n> [lead_time] [safety_stock]   |   whatif <n> <scenario>\n");

    if let Some(advice) = app.advice() {
        out.push('\n');
        out.push_str(advice.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActiveView;
    use crate::test_support::{app, StubBackend};

    #[tokio::test]
    async fn test_empty_catalog_blocks_ai_tools() {
        let backend = StubBackend::healthy();
        backend.on("GET /skus", 200, "[]");
        let app = app(&backend, ActiveView::Advisor);
        app.start().await;

        assert!(render(&app).contains("No products found."));
    }

    #[tokio::test]
    async fn test_advice_is_shown_below_picker() {
        let backend = StubBackend::healthy();
        let mut app = app(&backend, ActiveView::Advisor);
        app.start().await;
        app.set_advice("Reorder 140 units.".to_string());

        let out = render(&app);
        assert!(out.contains("Hex Bolt M6 (Stock: 120)"));
        assert!(out.ends_with("Reorder 140 units.\n"));
    }
}
