//! Service layer for pacing computation and visualization data.
//!
//! These modules are storage-agnostic: they take flights and delivery records
//! by reference and return derived data. Orchestration against the store
//! lives in [`crate::db::services`].

pub mod pacing;
pub mod pacing_cache;
pub mod timeline;

pub use pacing::{
    aggregate_delivery, compute_pacing, compute_pacing_batch, pacing_from_totals, PacingEngine,
};
pub use pacing_cache::PacingCache;
pub use timeline::{bar_fill, build_timeline, group_key, TimelineState};
