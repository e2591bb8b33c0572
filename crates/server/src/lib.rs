//! TorrentBay server library: router, app state and HTTP metrics.
//!
//! The binary in `main.rs` wires these together; integration tests drive the
//! router in-process.

pub mod api;
pub mod metrics;
pub mod state;

pub use api::create_router;
pub use state::AppState;
