//! # stockwise-core: Pure Domain Logic for the StockWise Dashboard
//!
//! This crate holds everything the dashboard knows about inventory data
//! without touching the network, the clock, or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     StockWise Dashboard Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   apps/dashboard (terminal)                     │   │
//! │  │   Dashboard ── Catalog ── Advisor ── Reports ── Settings        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockwise-client (HTTP + state)                   │   │
//! │  │   Resource<S>, Mutations, ReportExporter, Advisor              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockwise-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ normalize │  │ validation│  │   │
//! │  │   │    Sku    │  │   Money   │  │  bytes →  │  │   sale,   │  │   │
//! │  │   │  Metrics  │  │  (cents)  │  │  snapshot │  │  sku refs │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sku, DashboardMetrics, AuditReport, ...)
//! - [`money`] - Money type held in cents, JSON decimal on the wire
//! - [`normalize`] - Backend body → resource snapshot
//! - [`validation`] - Checks run before any write reaches the network
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockwise_core::normalize::normalize_trend;
//!
//! let body = br#"{"data":{"sales_over_time":[{"period_end":"2025-11-09","quantity_sold":12}]}}"#;
//! let series = normalize_trend(body);
//! assert_eq!(series[0].quantity_sold, 12);
//!
//! // Missing data is an empty chart, not an error
//! assert!(normalize_trend(br#"{"data":{}}"#).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod normalize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of a well-formed SKU reference.
///
/// Backend ids are UUIDs (36 chars); anything shorter than this was
/// truncated or never selected.
pub const MIN_SKU_ID_LEN: usize = 30;

/// Low-stock threshold assumed until the backend reports its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 50;

/// Maximum SKU display name length accepted by the backend.
pub const MAX_SKU_NAME_LEN: usize = 255;

/// Maximum unit-of-measure length accepted by the backend.
pub const MAX_UNIT_OF_MEASURE_LEN: usize = 50;
