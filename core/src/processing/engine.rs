use crate::prelude::{
    DisplayRange, FilterStage, InvalidQueryError, QueryError, QueryResult, StageVerdict,
    DISPLAY_PADDING_MHZ,
};
use crate::processing::frequency::FrequencyStage;
use crate::processing::proximity::ProximityStage;
use crate::processing::query::{Query, QueryParams};
use crate::processing::tiering::{assign_tiers, TieredResult};
use crate::store::{Record, RecordStore};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a caller can raise to abandon an evaluation.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

struct Candidate<'a> {
    record: &'a Record,
    distance_km: Option<f64>,
}

fn apply_stage<'a>(
    stage: &dyn FilterStage,
    candidates: Vec<Candidate<'a>>,
) -> Vec<Candidate<'a>> {
    candidates
        .into_iter()
        .filter_map(|mut candidate| match stage.check(candidate.record) {
            StageVerdict::Reject => None,
            StageVerdict::Accept => Some(candidate),
            StageVerdict::AcceptAt(distance) => {
                candidate.distance_km = Some(distance);
                Some(candidate)
            }
        })
        .collect()
}

/// Runs the frequency pass first since it is cheaper than the distance pass.
fn survivors<'a>(store: &'a RecordStore, query: &Query) -> Vec<(&'a Record, f64)> {
    let frequency = FrequencyStage::new(query.band());
    let proximity = ProximityStage::new(query.point(), query.radius_km());
    let stages: [&dyn FilterStage; 2] = [&frequency, &proximity];

    let mut candidates: Vec<Candidate<'a>> = store
        .iter()
        .map(|record| Candidate {
            record,
            distance_km: None,
        })
        .collect();
    for stage in stages {
        if candidates.is_empty() {
            break;
        }
        candidates = apply_stage(stage, candidates);
    }

    let center = query.point();
    candidates
        .into_iter()
        .map(|candidate| {
            let distance = candidate
                .distance_km
                .unwrap_or_else(|| center.distance_km(&candidate.record.point()));
            (candidate.record, distance)
        })
        .collect()
}

/// Filters `store` by band overlap and distance, then numbers the tiers.
///
/// Pure: reads the store, allocates only the result.
pub fn evaluate(store: &RecordStore, query: &Query) -> TieredResult {
    assign_tiers(survivors(store, query))
}

/// Like [`evaluate`], checking `cancel` before filtering and again before
/// tiering.
pub fn evaluate_with_cancel(
    store: &RecordStore,
    query: &Query,
    cancel: &CancelFlag,
) -> QueryResult<TieredResult> {
    if cancel.is_cancelled() {
        return Err(QueryError::Cancelled);
    }
    let survivors = survivors(store, query);
    if cancel.is_cancelled() {
        return Err(QueryError::Cancelled);
    }
    Ok(assign_tiers(survivors))
}

/// Result handed to a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: Query,
    pub display_range: Option<DisplayRange>,
    #[serde(flatten)]
    pub result: TieredResult,
}

impl QueryOutcome {
    fn new(query: Query, result: TieredResult, padding_mhz: f64) -> Self {
        Self {
            query,
            display_range: result.display_range(padding_mhz),
            result,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Query front end that wraps [`evaluate`] with logging and counters.
pub struct QueryEngine {
    padding_mhz: f64,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::with_padding(DISPLAY_PADDING_MHZ)
    }

    pub fn with_padding(padding_mhz: f64) -> Self {
        Self {
            padding_mhz,
            logger: LogManager::new("query"),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Validates transport parameters, then evaluates.
    pub fn run(
        &self,
        store: &RecordStore,
        params: &QueryParams,
    ) -> Result<QueryOutcome, InvalidQueryError> {
        match params.parse() {
            Ok(query) => Ok(self.execute(store, &query)),
            Err(err) => {
                self.metrics.record_rejected();
                Err(err)
            }
        }
    }

    pub fn execute(&self, store: &RecordStore, query: &Query) -> QueryOutcome {
        let result = evaluate(store, query);
        self.metrics.record_served(result.len());
        self.logger.detail(&format!(
            "query matched {} of {} records in {} tiers",
            result.len(),
            store.len(),
            result.tier_count()
        ));
        QueryOutcome::new(*query, result, self.padding_mhz)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}
