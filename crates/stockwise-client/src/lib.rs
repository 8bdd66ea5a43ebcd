//! # stockwise-client: Data Layer for the StockWise Dashboard
//!
//! Everything that talks to the StockWise backend lives here.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       stockwise-client                                  │
//! │                                                                         │
//! │   ┌─────────────────────────────────────────────────────────────────┐  │
//! │   │                    StockWiseClient (client)                     │  │
//! │   └───┬──────────────┬──────────────┬──────────────┬────────────────┘  │
//! │       │              │              │              │                    │
//! │  ┌────▼─────┐  ┌─────▼──────┐  ┌────▼─────┐  ┌─────▼─────┐             │
//! │  │ resource │  │  mutation  │  │  export  │  │ advisory  │             │
//! │  │Resource<S│  │ Mutations  │  │ Report   │  │ Advisor   │             │
//! │  │ + specs  │◄─┤ invalidate │  │ Exporter │  │ (AI)      │             │
//! │  └────┬─────┘  └─────┬──────┘  └────┬─────┘  └─────┬─────┘             │
//! │       └──────────────┴─────┬────────┴──────────────┘                    │
//! │                      ┌─────▼──────┐        ┌──────────┐                 │
//! │                      │ transport  │◄───────│  config  │                 │
//! │                      │ Api/Backend│        │  (TOML)  │                 │
//! │                      └─────┬──────┘        └──────────┘                 │
//! │                            ▼                                            │
//! │                  StockWise REST API (/api/...)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use stockwise_client::{ClientConfig, StockWiseClient};
//!
//! # async fn run() -> stockwise_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let client = StockWiseClient::connect(&config)?;
//!
//! client.metrics.mount().await;
//! println!("{:?}", client.metrics.state().value);
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod mutation;
pub mod resource;
pub mod resources;
pub mod transport;

pub use advisory::Advisor;
pub use client::StockWiseClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use export::ReportExporter;
pub use mutation::{MutationKind, Mutations};
pub use resource::{RefreshOutcome, Refreshable, Resource, ResourceId, ResourceSpec, ResourceState};
pub use resources::{CatalogQuery, TrendQuery};
pub use transport::{Api, ApiRequest, ApiResponse, Backend, HttpBackend, Method};
