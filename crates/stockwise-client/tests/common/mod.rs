//! Shared fixtures: an in-memory backend that records every request.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stockwise_client::{
    ApiRequest, ApiResponse, Backend, ClientConfig, ClientError, ClientResult, Method,
    StockWiseClient,
};
use tokio::sync::oneshot;

pub const SKU_ID: &str = "54a1c574-4605-4b20-b2ae-65746d4517ff";
pub const OTHER_SKU_ID: &str = "9b2f0c1e-3d4a-4e5b-8c6d-7e8f9a0b1c2d";

#[derive(Clone)]
enum Reply {
    Status(u16, Vec<u8>),
    Offline,
}

struct Gate {
    arrived: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Handle returned by [`FakeBackend::hold`].
pub struct Held {
    pub arrived: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

/// Canned responses keyed by `"METHOD /path"` or `"METHOD /path?k=v"`.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Gate>>,
    log: Mutex<Vec<ApiRequest>>,
}

fn key(method: Method, path: &str) -> String {
    format!("{} {}", method, path)
}

fn full_key(request: &ApiRequest) -> String {
    let query: Vec<String> = request
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    if query.is_empty() {
        key(request.method, &request.path)
    } else {
        format!("{}?{}", key(request.method, &request.path), query.join("&"))
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Serves `body` with `status` for `route` (e.g. `"GET /skus"`).
    pub fn on(&self, route: &str, status: u16, body: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Reply::Status(status, body.as_bytes().to_vec()));
        self
    }

    /// Makes `route` fail without an HTTP response.
    pub fn offline(&self, route: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Reply::Offline);
        self
    }

    /// The next request on `route` waits until `release` fires.
    pub fn hold(&self, route: &str) -> Held {
        let (arrived_tx, arrived_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(
            route.to_string(),
            Gate {
                arrived: arrived_tx,
                release: release_rx,
            },
        );
        Held {
            arrived: arrived_rx,
            release: release_tx,
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Number of recorded requests for `METHOD /path`, any query.
    pub fn count(&self, route: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| key(r.method, &r.path) == route)
            .count()
    }

    pub fn total(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.log.lock().unwrap().push(request.clone());

        let full = full_key(&request);
        let bare = key(request.method, &request.path);

        let gate = {
            let mut gates = self.gates.lock().unwrap();
            gates.remove(&full).or_else(|| gates.remove(&bare))
        };
        if let Some(gate) = gate {
            let _ = gate.arrived.send(());
            let _ = gate.release.await;
        }

        let reply = {
            let routes = self.routes.lock().unwrap();
            routes.get(&full).or_else(|| routes.get(&bare)).cloned()
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::Offline) => Err(ClientError::Transport("connection refused".to_string())),
            None => Ok(ApiResponse::new(404, br#"{"error":"Not found"}"#.to_vec())),
        }
    }
}

pub fn client(backend: &Arc<FakeBackend>) -> StockWiseClient {
    client_with(backend, ClientConfig::default())
}

pub fn client_with(backend: &Arc<FakeBackend>, config: ClientConfig) -> StockWiseClient {
    StockWiseClient::with_backend(backend.clone(), &config)
}

pub fn catalog_json() -> String {
    format!(
        r#"[
            {{"skuid":"{}","sku_name":"Hex Bolt M6","description":"Zinc plated","unit_of_measure":"box","current_stock_level":120}},
            {{"skuid":"{}","sku_name":"Washer 6mm","description":null,"unit_of_measure":"bag","current_stock_level":8}}
        ]"#,
        SKU_ID, OTHER_SKU_ID
    )
}

pub const METRICS_JSON: &str = r#"{
    "total_active_skus": 2,
    "total_stock_count": 128,
    "total_inventory_value_estimated": 4800.0,
    "low_stock_items_count": 1,
    "total_sales_revenue": 950.75,
    "low_stock_threshold_units": 50
}"#;

pub const TREND_JSON: &str = r#"{
    "sku_name": "Hex Bolt M6",
    "stock_level": 120,
    "time_period": "W",
    "data": {
        "sales_over_time": [
            {"period_end": "2025-11-02", "quantity_sold": 12},
            {"period_end": "2025-11-09", "quantity_sold": 7}
        ],
        "average_sales_per_period": 9.5
    }
}"#;

pub const REPORT_JSON: &str = r#"{
    "report_summary": "STOCKWISE AI INVENTORY SUMMARY REPORT",
    "metrics": {
        "total_active_skus": 2,
        "total_stock_count": 128,
        "total_inventory_value_estimated": 4800.0,
        "low_stock_items_count": 1,
        "total_sales_revenue": 950.75,
        "low_stock_threshold_units": 50
    }
}"#;

/// Routes for a healthy backend.
pub fn healthy() -> Arc<FakeBackend> {
    let backend = FakeBackend::new();
    backend
        .on("GET /skus", 200, &catalog_json())
        .on("GET /dashboard/metrics", 200, METRICS_JSON)
        .on(&format!("GET /skus/{}/sales/summary", SKU_ID), 200, TREND_JSON)
        .on("GET /reports/summary", 200, REPORT_JSON)
        .on("GET /reports/summary?format=csv", 200, "Metric,Value\ntotal_active_skus,2\n")
        .on(
            "GET /health",
            200,
            r#"{"status":"healthy","database_status":"connected","sku_count":2}"#,
        );
    backend
}
