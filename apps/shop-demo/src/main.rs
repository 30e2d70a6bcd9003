//! # Shop Demo Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Shop Demo                                     │
//! │                                                                         │
//! │   stdin ──► session.rs ──► commands/ ──► state/ ──► view.rs ──► stdout │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                              shop-core (ledger)                         │
//! │                              shop-catalog (async loader)                │
//! │                                                                         │
//! │   stderr ◄── tracing                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    if let Err(e) = shop_demo_lib::run().await {
        eprintln!("shop-demo: {}", e);
        std::process::exit(1);
    }
}
