//! AI reorder recommendations and what-if analysis.

use stockwise_core::ReorderRequest;

use crate::error::AppResult;
use crate::state::{ActiveView, App};

pub(super) async fn recommend(
    app: &mut App,
    token: &str,
    lead_time: Option<u32>,
    safety_stock: Option<u32>,
) -> AppResult<()> {
    let skuid = app.resolve_sku(token)?;
    let defaults = ReorderRequest::default();
    let request = ReorderRequest {
        lead_time: lead_time.unwrap_or(defaults.lead_time),
        safety_stock: safety_stock.unwrap_or(defaults.safety_stock),
    };

    app.switch_to(ActiveView::Advisor).await;
    let advice = app
        .client()
        .advisor
        .reorder_recommendation(&skuid, request)
        .await?;
    app.set_advice(advice);
    Ok(())
}

pub(super) async fn what_if(app: &mut App, token: &str, scenario: &str) -> AppResult<()> {
    let skuid = app.resolve_sku(token)?;

    app.switch_to(ActiveView::Advisor).await;
    let analysis = app
        .client()
        .advisor
        .scenario_analysis(&skuid, scenario)
        .await?;
    app.set_advice(analysis);
    Ok(())
}
