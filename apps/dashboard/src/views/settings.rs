//! Effective client configuration.

use std::fmt::Write;

use crate::state::App;

pub(super) fn render(app: &App) -> String {
    let config = app.config();
    let mut out = String::from("User Settings Coming Soon!\n\n");

    let _ = writeln!(out, "API base URL       {}", config.api.base_url);
    let _ = writeln!(out, "Connect timeout    {}s", config.api.connect_timeout_secs);
    match config.api.request_timeout_secs {
        Some(secs) => {
            let _ = writeln!(out, "Request timeout    {secs}s");
        }
        None => out.push_str("Request timeout    none\n"),
    }
    let _ = writeln!(out, "Export directory   {}", config.export.directory.display());
    let _ = writeln!(
        out,
        "Trend SKU          {}",
        app.focus_sku().unwrap_or("(none)")
    );
    out
}
