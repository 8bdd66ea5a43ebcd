//! SKU management: search, add, edit details, set stock.

use stockwise_client::CatalogQuery;
use stockwise_core::{NewSku, SkuDetailsUpdate};
use tracing::info;

use crate::error::AppResult;
use crate::state::{ActiveView, App};

/// Filters the catalog. Searching always shows the catalog view.
///
/// From another view the query becomes the mount's fetch, so one search is
/// one read. Later remounts start unfiltered again.
pub(super) async fn search(app: &mut App, term: Option<String>) {
    let query = term.map(CatalogQuery::search).unwrap_or_default();

    if app.view() == ActiveView::Catalog {
        app.client().catalog.refresh(Some(query)).await;
        return;
    }

    app.client().catalog.set_defaults(query);
    app.switch_to(ActiveView::Catalog).await;
    app.client().catalog.set_defaults(CatalogQuery::default());
}

pub(super) async fn add(app: &mut App, sku: NewSku) -> AppResult<()> {
    let created = app.client().mutations.create_sku(&sku).await?;
    info!(sku_id = %created.sku_id, "SKU created");
    if created.sku_id.is_empty() {
        app.success(non_empty(created.message, "SKU added successfully!"));
    } else {
        app.success(format!("SKU added successfully! ID: {}", created.sku_id));
    }
    Ok(())
}

pub(super) async fn edit(app: &mut App, token: &str, update: SkuDetailsUpdate) -> AppResult<()> {
    let skuid = app.resolve_sku(token)?;
    let ack = app
        .client()
        .mutations
        .update_sku_details(&skuid, &update)
        .await?;
    app.success(non_empty(ack.message, "SKU details updated."));
    Ok(())
}

pub(super) async fn set_stock(app: &mut App, token: &str, level: u64) -> AppResult<()> {
    let skuid = app.resolve_sku(token)?;
    let ack = app.client().mutations.update_stock(&skuid, level).await?;
    app.success(non_empty(ack.message, "Stock level updated."));
    Ok(())
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::{execute, parse};
    use crate::state::{ActiveView, Notice};
    use crate::test_support::{app, StubBackend, SKU_ID};

    #[tokio::test]
    async fn test_search_switches_to_catalog() {
        let backend = StubBackend::healthy();
        let mut app = app(&backend, ActiveView::Dashboard);
        app.start().await;

        execute(&mut app, parse("search bolt").unwrap().unwrap()).await;
        assert_eq!(app.view(), ActiveView::Catalog);
        assert_eq!(backend.count("GET /skus"), 1);
        let last = backend.requests().pop().unwrap();
        assert_eq!(last.query_value("search"), Some("bolt"));

        execute(&mut app, parse("search washer").unwrap().unwrap()).await;
        assert_eq!(backend.count("GET /skus"), 2);
        let last = backend.requests().pop().unwrap();
        assert_eq!(last.query_value("search"), Some("washer"));
    }

    #[tokio::test]
    async fn test_remount_after_search_is_unfiltered() {
        let backend = StubBackend::healthy();
        let mut app = app(&backend, ActiveView::Dashboard);
        app.start().await;

        execute(&mut app, parse("search bolt").unwrap().unwrap()).await;
        execute(&mut app, parse("view dashboard").unwrap().unwrap()).await;
        execute(&mut app, parse("view catalog").unwrap().unwrap()).await;

        let last = backend
            .requests()
            .into_iter()
            .rev()
            .find(|r| r.path == "/skus")
            .unwrap();
        assert_eq!(last.query_value("search"), None);
    }

    #[tokio::test]
    async fn test_stock_by_row_refreshes_catalog() {
        let backend = StubBackend::healthy();
        backend.on(
            &format!("PATCH /skus/{SKU_ID}/stock"),
            200,
            r#"{"message":"Stock level updated to 40"}"#,
        );
        let mut app = app(&backend, ActiveView::Catalog);
        app.start().await;

        execute(&mut app, parse("stock 1 40").unwrap().unwrap()).await;
        assert_eq!(
            app.take_notice(),
            Some(Notice::Success("Stock level updated to 40".into()))
        );
        assert_eq!(backend.count("GET /skus"), 2);
    }

    #[tokio::test]
    async fn test_add_failure_is_inline() {
        let backend = StubBackend::healthy();
        backend.on("POST /skus", 409, r#"{"error":"SKU name already exists"}"#);
        let mut app = app(&backend, ActiveView::Catalog);

        execute(&mut app, parse("add Hex Bolt M6 | box").unwrap().unwrap()).await;
        assert_eq!(
            app.take_notice(),
            Some(Notice::Error("SKU name already exists".into()))
        );
    }
}
