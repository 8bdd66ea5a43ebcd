//! In-memory backend for view and command tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stockwise_client::{
    ApiRequest, ApiResponse, Backend, ClientConfig, ClientError, ClientResult, StockWiseClient,
};

use crate::state::{ActiveView, App};

pub const SKU_ID: &str = "54a1c574-4605-4b20-b2ae-65746d4517ff";
pub const OTHER_SKU_ID: &str = "9b2f0c1e-3d4a-4e5b-8c6d-7e8f9a0b1c2d";

#[derive(Default)]
pub struct StubBackend {
    routes: Mutex<HashMap<String, Option<(u16, String)>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl StubBackend {
    pub fn healthy() -> Arc<Self> {
        let backend = Arc::new(Self::default());
        let catalog = format!(
            r#"[
                {{"skuid":"{SKU_ID}","sku_name":"Hex Bolt M6","description":"Zinc plated","unit_of_measure":"box","current_stock_level":120}},
                {{"skuid":"{OTHER_SKU_ID}","sku_name":"Washer 6mm","description":null,"unit_of_measure":"bag","current_stock_level":8}}
            ]"#
        );
        let metrics = r#"{"total_active_skus":2,"total_stock_count":128,
            "total_inventory_value_estimated":4800.0,"low_stock_items_count":1,
            "total_sales_revenue":950.75,"low_stock_threshold_units":50}"#;
        backend
            .on("GET /skus", 200, &catalog)
            .on("GET /dashboard/metrics", 200, metrics)
            .on(
                &format!("GET /skus/{SKU_ID}/sales/summary"),
                200,
                r#"{"data":{"sales_over_time":[
                    {"period_end":"2025-11-02","quantity_sold":12},
                    {"period_end":"2025-11-09","quantity_sold":7}]}}"#,
            )
            .on(
                "GET /reports/summary",
                200,
                &format!(r#"{{"report_summary":"STOCKWISE AI INVENTORY SUMMARY REPORT","metrics":{metrics}}}"#),
            )
            .on("GET /reports/summary?format=csv", 200, "Metric,Value\ntotal_active_skus,2\n")
            .on(
            "GET /health",
            200,
            r#"{"status":"healthy","database_status":"connected","sku_count":2}"#,
        );
        backend
    }

    pub fn on(&self, route: &str, status: u16, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Some((status, body.to_string())));
        self
    }

    pub fn offline(&self, route: &str) -> &Self {
        self.routes.lock().unwrap().insert(route.to_string(), None);
        self
    }

    /// Requests recorded for `METHOD /path`, any query.
    pub fn count(&self, route: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| format!("{} {}", r.method, r.path) == route)
            .count()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn total(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.log.lock().unwrap().push(request.clone());

        let bare = format!("{} {}", request.method, request.path);
        let query: Vec<String> = request
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let full = format!("{}?{}", bare, query.join("&"));

        let routes = self.routes.lock().unwrap();
        match routes.get(&full).or_else(|| routes.get(&bare)) {
            Some(Some((status, body))) => Ok(ApiResponse::new(*status, body.as_bytes().to_vec())),
            Some(None) => Err(ClientError::Transport("connection refused".to_string())),
            None => Ok(ApiResponse::new(404, br#"{"error":"Not found"}"#.to_vec())),
        }
    }
}

pub fn app(backend: &Arc<StubBackend>, view: ActiveView) -> App {
    app_with(backend, ClientConfig::default(), view)
}

pub fn app_with(backend: &Arc<StubBackend>, config: ClientConfig, view: ActiveView) -> App {
    let client = StockWiseClient::with_backend(backend.clone(), &config);
    App::new(client, config, view)
}
