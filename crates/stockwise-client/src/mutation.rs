//! # Mutation Operations
//!
//! Writes to the backend and the read domains each write makes stale.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Mutation Flow                                   │
//! │                                                                         │
//! │  input ──► validation ──✗──► Err(Validation)   (no request sent)       │
//! │                │                                                        │
//! │                ✓                                                        │
//! │                ▼                                                        │
//! │           one request ──non-2xx──► Err(Http {error} or fallback)       │
//! │                │                                                        │
//! │               2xx                                                       │
//! │                ▼                                                        │
//! │   refresh every resource in kind.invalidates(), once, with last params │
//! │                ▼                                                        │
//! │              Ok(ack)                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invalidation Table
//! | Mutation          | Invalidates        |
//! |-------------------|--------------------|
//! | CreateSku         | Catalog            |
//! | UpdateSkuDetails  | Catalog            |
//! | UpdateStock       | Catalog            |
//! | RecordSale        | Catalog, Metrics   |

use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use stockwise_core::validation::{
    validate_details_update, validate_new_sku, validate_sale, validate_sku_ref,
};
use stockwise_core::{
    Ack, NewSku, SaleDraft, SaleReceipt, SkuCreated, SkuDetailsUpdate, StockUpdate,
};
use tracing::{debug, info, warn};

use crate::error::ClientResult;
use crate::resource::{Refreshable, ResourceId};
use crate::transport::{Api, ApiRequest};

// =============================================================================
// Mutation Kind
// =============================================================================

/// Every write the dashboard performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateSku,
    UpdateSkuDetails,
    UpdateStock,
    RecordSale,
}

impl MutationKind {
    /// Resources refreshed after a successful write.
    pub fn invalidates(&self) -> &'static [ResourceId] {
        match self {
            MutationKind::CreateSku => &[ResourceId::Catalog],
            MutationKind::UpdateSkuDetails => &[ResourceId::Catalog],
            MutationKind::UpdateStock => &[ResourceId::Catalog],
            MutationKind::RecordSale => &[ResourceId::Catalog, ResourceId::Metrics],
        }
    }

    /// Human name used in the status fallback message.
    pub fn action(&self) -> &'static str {
        match self {
            MutationKind::CreateSku => "Add SKU",
            MutationKind::UpdateSkuDetails => "Update SKU details",
            MutationKind::UpdateStock => "Stock update",
            MutationKind::RecordSale => "Record sale",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::CreateSku => write!(f, "create_sku"),
            MutationKind::UpdateSkuDetails => write!(f, "update_sku_details"),
            MutationKind::UpdateStock => write!(f, "update_stock"),
            MutationKind::RecordSale => write!(f, "record_sale"),
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Write operations bound to the resources they invalidate.
pub struct Mutations {
    api: Api,
    resources: Vec<Arc<dyn Refreshable>>,
    today: fn() -> NaiveDate,
}

impl Mutations {
    /// Creates the mutation set. `resources` are looked up by id on success.
    pub fn new(api: Api, resources: Vec<Arc<dyn Refreshable>>) -> Self {
        Self {
            api,
            resources,
            today: local_today,
        }
    }

    /// Replaces the clock used for the sale-date check.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// `POST /skus`.
    pub async fn create_sku(&self, sku: &NewSku) -> ClientResult<SkuCreated> {
        let sku = validate_new_sku(sku)?;
        let request = ApiRequest::post("/skus").json(&sku)?;
        self.run(MutationKind::CreateSku, request).await
    }

    /// `PUT /skus/{id}`.
    pub async fn update_sku_details(
        &self,
        skuid: &str,
        update: &SkuDetailsUpdate,
    ) -> ClientResult<Ack> {
        let skuid = validate_sku_ref(Some(skuid))?;
        let update = validate_details_update(update)?;
        let request = ApiRequest::put(format!("/skus/{}", skuid)).json(&update)?;
        self.run(MutationKind::UpdateSkuDetails, request).await
    }

    /// `PATCH /skus/{id}/stock`.
    pub async fn update_stock(&self, skuid: &str, new_stock_level: u64) -> ClientResult<Ack> {
        let skuid = validate_sku_ref(Some(skuid))?;
        let request = ApiRequest::patch(format!("/skus/{}/stock", skuid))
            .json(&StockUpdate { new_stock_level })?;
        self.run(MutationKind::UpdateStock, request).await
    }

    /// `POST /sales`.
    pub async fn record_sale(&self, draft: &SaleDraft) -> ClientResult<SaleReceipt> {
        let record = validate_sale(draft, (self.today)())?;
        let request = ApiRequest::post("/sales").json(&record)?;
        self.run(MutationKind::RecordSale, request).await
    }

    /// A 2xx status means the write committed. An ack body that does not
    /// decode as `T` yields `T::default()`.
    async fn run<T: DeserializeOwned + Default>(
        &self,
        kind: MutationKind,
        request: ApiRequest,
    ) -> ClientResult<T> {
        debug!(mutation = %kind, path = %request.path, "Sending mutation");
        let response = self.api.execute(kind.action(), request).await?;
        info!(mutation = %kind, status = response.status, "Mutation succeeded");

        self.invalidate(kind).await;

        Ok(decode_ack(kind, &response.body))
    }

    /// Refreshes each invalidated resource once, concurrently.
    async fn invalidate(&self, kind: MutationKind) {
        let stale = kind.invalidates();
        let refreshes = self
            .resources
            .iter()
            .filter(|r| stale.contains(&r.resource_id()))
            .map(|r| {
                debug!(mutation = %kind, resource = %r.resource_id(), "Invalidating");
                r.refresh_last()
            });
        join_all(refreshes).await;
    }
}

fn decode_ack<T: DeserializeOwned + Default>(kind: MutationKind, body: &[u8]) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!(mutation = %kind, %err, "Unreadable mutation ack, using defaults");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidation_table() {
        assert_eq!(MutationKind::CreateSku.invalidates(), &[ResourceId::Catalog]);
        assert_eq!(MutationKind::UpdateStock.invalidates(), &[ResourceId::Catalog]);
        assert_eq!(
            MutationKind::RecordSale.invalidates(),
            &[ResourceId::Catalog, ResourceId::Metrics]
        );
        for kind in [
            MutationKind::CreateSku,
            MutationKind::UpdateSkuDetails,
            MutationKind::UpdateStock,
            MutationKind::RecordSale,
        ] {
            assert!(!kind.invalidates().contains(&ResourceId::SalesTrend));
            assert!(!kind.invalidates().contains(&ResourceId::Report));
        }
    }

    #[test]
    fn test_decode_ack() {
        let created: SkuCreated = decode_ack(
            MutationKind::CreateSku,
            br#"{"message":"SKU created","sku_id":"abc"}"#,
        );
        assert_eq!(created.sku_id, "abc");

        let created: SkuCreated =
            decode_ack(MutationKind::CreateSku, br#"{"message":"SKU created"}"#);
        assert_eq!(created.sku_id, "");

        let receipt: SaleReceipt = decode_ack(MutationKind::RecordSale, b"OK");
        assert_eq!(receipt, SaleReceipt::default());

        let ack: Ack = decode_ack(MutationKind::UpdateStock, b"");
        assert_eq!(ack, Ack::default());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(MutationKind::CreateSku.action(), "Add SKU");
        assert_eq!(MutationKind::RecordSale.to_string(), "record_sale");
    }
}
