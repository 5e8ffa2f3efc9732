//! # State Module
//!
//! Manages register state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Register                                   │   │
//! │  │  ConfigState::from_env() ──► SessionState::from_config(&cfg)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐            │
//! │  │ SessionState │  │ InventoryState │  │   ConfigState    │            │
//! │  │              │  │                │  │                  │            │
//! │  │  Arc<Mutex<  │  │  stock levels  │  │  store_name      │            │
//! │  │  SaleSession │  │                │  │  tax_rate_bps    │            │
//! │  │  >>          │  │                │  │  tenders         │            │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • InventoryState, ConfigState: Read-only after initialization         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;
mod session;

pub use config::ConfigState;
pub use inventory::InventoryState;
pub use session::SessionState;
