//! # AI Advisory
//!
//! Stateless calls to the backend's AI endpoints. Nothing is cached and
//! no resource is touched.
//!
//! ## Error Mapping
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ Outcome                      │ Message                                  │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ no SKU / blank scenario      │ validation message, no request           │
//! │ no HTTP response             │ "Network error or API server issue: .."  │
//! │ non-2xx with {error}         │ backend message verbatim                 │
//! │ non-2xx without {error}      │ "Unknown error occurred."                │
//! │ 2xx missing the answer field │ "Failed to get recommendation." / ...    │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use serde_json::Value;
use stockwise_core::validation::{validate_scenario, validate_selected_sku};
use stockwise_core::{ReorderRequest, ScenarioRequest};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::transport::{Api, ApiRequest};

const UNKNOWN_ERROR: &str = "Unknown error occurred.";

/// AI advisory client.
#[derive(Debug, Clone)]
pub struct Advisor {
    api: Api,
}

impl Advisor {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// `POST /skus/{id}/recommendation` → `ai_recommendation`.
    pub async fn reorder_recommendation(
        &self,
        skuid: &str,
        request: ReorderRequest,
    ) -> ClientResult<String> {
        let skuid = validate_selected_sku(skuid)?;
        let request = ApiRequest::post(format!("/skus/{}/recommendation", skuid)).json(&request)?;
        self.ask(request, "ai_recommendation", "Failed to get recommendation.")
            .await
    }

    /// `POST /skus/{id}/whatif` → `ai_analysis`.
    pub async fn scenario_analysis(&self, skuid: &str, description: &str) -> ClientResult<String> {
        let skuid = validate_selected_sku(skuid)?;
        validate_scenario(description)?;
        let body = ScenarioRequest {
            scenario_description: description.trim().to_string(),
        };
        let request = ApiRequest::post(format!("/skus/{}/whatif", skuid)).json(&body)?;
        self.ask(request, "ai_analysis", "Failed to get scenario analysis.")
            .await
    }

    async fn ask(
        &self,
        request: ApiRequest,
        field: &str,
        missing: &str,
    ) -> ClientResult<String> {
        debug!(path = %request.path, "Requesting AI advice");
        let response = self.api.send(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "AI request rejected");
            return Err(ClientError::Http {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            });
        }

        serde_json::from_slice::<Value>(&response.body)
            .ok()
            .and_then(|v| v.get(field).and_then(Value::as_str).map(str::to_string))
            .ok_or_else(|| ClientError::Decode(missing.to_string()))
    }
}
