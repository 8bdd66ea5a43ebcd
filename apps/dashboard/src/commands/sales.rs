//! Recording sales.

use chrono::{Local, NaiveDate};
use stockwise_core::{Money, SaleDraft};
use tracing::info;

use crate::error::AppResult;
use crate::state::App;

/// Records a sale. Catalog and metrics refresh on success.
pub(super) async fn sell(
    app: &mut App,
    token: &str,
    quantity: u64,
    price: Money,
    date: Option<NaiveDate>,
) -> AppResult<()> {
    let draft = SaleDraft {
        skuid: Some(app.resolve_sku(token)?),
        quantity_sold: quantity,
        selling_price: price,
        sale_date: date.unwrap_or_else(|| Local::now().date_naive()),
    };

    let receipt = app.client().mutations.record_sale(&draft).await?;
    info!(sale_id = ?receipt.sale_id, new_stock = ?receipt.new_stock, "Sale recorded");

    let mut message = if receipt.message.trim().is_empty() {
        "Sale recorded.".to_string()
    } else {
        receipt.message
    };
    if let Some(stock) = receipt.new_stock {
        message.push_str(&format!(" New stock: {stock}"));
    }
    app.success(message);
    Ok(())
}
