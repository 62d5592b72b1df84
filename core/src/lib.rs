//! Record store and query engine for locating licensed spectrum allocations.
//!
//! Raw dataset rows are normalized once into a [`store::RecordStore`]; each
//! query then filters it by frequency-band overlap and great-circle distance
//! and groups the survivors into presentation tiers.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod store;
pub mod telemetry;

pub use prelude::{DataFormatError, InvalidQueryError, QueryError};
pub use processing::{evaluate, Query, QueryEngine, QueryParams, TieredResult};
pub use store::{build_store, BuildReport, RecordStore, StoreHandle};
