//! SKU table. Row numbers are what `stock`, `sell`, `edit` and friends accept.

use std::fmt::Write;
use stockwise_core::money::group_thousands;
use stockwise_core::Sku;

use super::status_line;
use crate::state::App;

pub(super) fn render(app: &App) -> String {
    let catalog = &app.client().catalog;
    let state = catalog.state();
    let mut out = String::new();

    if let Some(term) = catalog.last_params().search {
        let _ = writeln!(out, "Search: \"{term}\"");
    }

    match status_line(&state, "SKUs") {
        Some(line) => out.push_str(&line),
        None => out.push_str(&table(&state.value)),
    }
    out
}

/// The SKU table, or the empty-catalog message.
fn table(skus: &[Sku]) -> String {
    if skus.is_empty() {
        return "No SKUs found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<36}  {:<28}  {:<10}  {:>8}",
        "#", "SKU ID", "Name", "Unit", "Stock"
    );
    for (index, sku) in skus.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<36}  {:<28}  {:<10}  {:>8}",
            index + 1,
            sku.skuid,
            truncate(&sku.sku_name, 28),
            truncate(&sku.unit_of_measure, 10),
            group_thousands(sku.current_stock_level)
        );
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ActiveView;
    use crate::test_support::{app, StubBackend, SKU_ID};
    use stockwise_client::CatalogQuery;

    #[test]
    fn test_empty_table() {
        assert_eq!(table(&[]), "No SKUs found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Washer", 10), "Washer");
        assert_eq!(truncate("Stainless Steel Hex Bolt", 10), "Stainles...");
    }

    #[tokio::test]
    async fn test_catalog_lists_rows_and_search() {
        let backend = StubBackend::healthy();
        let app = app(&backend, ActiveView::Catalog);
        app.start().await;
        app.client()
            .catalog
            .refresh(Some(CatalogQuery::search("bolt")))
            .await;

        let out = render(&app);
        assert!(out.contains("Search: \"bolt\""));
        assert!(out.contains(SKU_ID));
        assert!(out.contains("  1  "));
        assert!(out.contains("Washer 6mm"));
    }

    #[tokio::test]
    async fn test_catalog_error() {
        let backend = StubBackend::healthy();
        backend.offline("GET /skus");
        let app = app(&backend, ActiveView::Catalog);
        app.start().await;

        assert!(render(&app).contains("Error: Could not load SKU list. Check API connection."));
    }
}
