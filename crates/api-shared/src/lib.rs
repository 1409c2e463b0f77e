//! # API Shared
//!
//! Wire types shared by the ICL board's outer surfaces.
//!
//! Contains:
//! - The listing envelope returned to the board (`ListingRes`)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the CLI so both print exactly the same JSON.

pub mod health;
pub mod listing;

pub use health::{HealthRes, HealthService};
pub use listing::{CounterRes, ListingRes, ResponseStatus, FAILURE_MESSAGE};
