//! # Application State
//!
//! ```text
//! state/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── view.rs     ◄─── ActiveView and the resources each view mounts
//! └── app.rs      ◄─── App: data layer + active view + notices
//! ```
//!
//! ## View Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   switch_to(Reports)                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   dispose Dashboard resources (metrics, sales_trend)                    │
//! │        │   in-flight responses are dropped from here on                 │
//! │        ▼                                                                │
//! │   mount Reports resources (report) ── one fetch each                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod view;

pub use app::{App, Notice};
pub use view::ActiveView;
