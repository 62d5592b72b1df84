pub mod engine;
pub mod frequency;
pub mod proximity;
pub mod query;
pub mod tiering;

pub use engine::{evaluate, evaluate_with_cancel, CancelFlag, QueryEngine, QueryOutcome};
pub use frequency::FrequencyStage;
pub use proximity::ProximityStage;
pub use query::{Query, QueryParams};
pub use tiering::{assign_tiers, RoleGroup, TieredEntry, TieredResult};
