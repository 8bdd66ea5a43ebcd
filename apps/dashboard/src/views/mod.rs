//! # Views
//!
//! Plain-text renderings of resource state, one module per view.
//!
//! ```text
//! views/
//! ├── mod.rs        ◄─── You are here (render dispatch, shared lines)
//! ├── dashboard.rs  ◄─── Metric cards + weekly sales trend
//! ├── catalog.rs    ◄─── SKU table
//! ├── advisor.rs    ◄─── SKU picker + last AI answer
//! ├── reports.rs    ◄─── Audit report metrics
//! └── settings.rs   ◄─── Effective client configuration
//! ```
//!
//! Every view reads state snapshots only; nothing here issues requests.

mod advisor;
mod catalog;
mod dashboard;
mod reports;
mod settings;

use stockwise_client::ResourceState;

use crate::state::{ActiveView, App, Notice};

/// Renders the active view.
pub fn render(app: &App) -> String {
    let view = app.view();
    let mut out = header(view);

    let body = match view {
        ActiveView::Dashboard => dashboard::render(app),
        ActiveView::Catalog => catalog::render(app),
        ActiveView::Advisor => advisor::render(app),
        ActiveView::Reports => reports::render(app),
        ActiveView::Settings => settings::render(app),
    };
    out.push_str(&body);
    out
}

/// Renders a one-shot notice.
pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Info(message) => message.clone(),
        Notice::Success(message) => format!("OK: {message}"),
        Notice::Error(message) => format!("Error: {message}"),
    }
}

fn header(current: ActiveView) -> String {
    let tabs: Vec<String> = ActiveView::ALL
        .iter()
        .map(|view| {
            if *view == current {
                format!("[{}]", view.title())
            } else {
                view.title().to_string()
            }
        })
        .collect();
    format!("StockWise AI | {}\n\n", tabs.join(" | "))
}

/// Loading or error line for a resource that has no value to show.
fn status_line<V>(state: &ResourceState<V>, what: &str) -> Option<String> {
    if state.is_loading {
        return Some(format!("Loading {what}...\n"));
    }
    state.error.as_ref().map(|error| format!("Error: {error}\n"))
}
