use crate::store::Record;
use serde::{Deserialize, Serialize};

/// Default margin applied around a result's frequency span for display.
pub const DISPLAY_PADDING_MHZ: f64 = 10.0;

/// Structural failure while building a record store.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataFormatError {
    #[error("required column `{0}` is absent from the dataset")]
    MissingColumn(String),
    #[error("no frequency column found (expected `{single}` or `{tx}`/`{rx}`)")]
    MissingFrequencyColumns {
        single: String,
        tx: String,
        rx: String,
    },
}

/// Caller-side validation failure for query parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidQueryError {
    #[error("missing query field `{0}`")]
    Missing(&'static str),
    #[error("query field `{field}` is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("query field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("min frequency {min} MHz exceeds max frequency {max} MHz")]
    InvertedBand { min: f64, max: f64 },
}

/// Error returned by query evaluation entry points that can refuse work.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("invalid query: {0}")]
    Invalid(#[from] InvalidQueryError),
    #[error("query evaluation cancelled")]
    Cancelled,
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Outcome of a single filter stage over one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageVerdict {
    Reject,
    Accept,
    /// Accepted, with the great-circle distance measured on the way.
    AcceptAt(f64),
}

impl StageVerdict {
    pub fn accepted(self) -> bool {
        !matches!(self, StageVerdict::Reject)
    }
}

/// A single predicate in the query pipeline.
///
/// Stages are stateless once constructed and only borrow the record, so the
/// same stage can be applied from any number of threads.
pub trait FilterStage {
    fn name(&self) -> &'static str;
    fn check(&self, record: &Record) -> StageVerdict;
}

/// Padded frequency axis bounds for a rendered result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min_mhz: f64,
    pub max_mhz: f64,
}
