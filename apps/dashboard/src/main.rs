//! # StockWise Dashboard Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command-line arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Load client configuration (file, then environment)
//! 4. Build the data layer and mount the initial view
//! 5. Run the command loop until `quit` or end of input
//!
//! The actual setup lives in lib.rs for testability.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    stockwise_dashboard::run(args).await
}
