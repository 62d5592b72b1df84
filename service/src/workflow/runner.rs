use crate::generator::dataset::build_rows;
use crate::workflow::config::ServiceConfig;
use crate::workflow::dataset::load_rows;
use anyhow::{bail, Context};
use serde::Serialize;
use spectrumcore::prelude::InvalidQueryError;
use spectrumcore::processing::{Query, QueryEngine, QueryOutcome, QueryParams};
use spectrumcore::store::{build_store_with, BuildReport, RawRow, RecordStore, StoreHandle};
use spectrumcore::telemetry::{LogManager, MetricsSnapshot};
use std::sync::{Arc, Mutex, PoisonError};

/// Store and query counters reported by `/health`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceStatus {
    pub records: usize,
    pub rows_read: usize,
    pub dropped_rows: usize,
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: ServiceConfig,
    store: StoreHandle,
    engine: Arc<QueryEngine>,
    /// Report of the build currently in `store`. Held across a reload so the
    /// swap and the report change together.
    report: Arc<Mutex<BuildReport>>,
}

impl Runner {
    /// Loads the configured dataset, or synthetic rows when `synthetic` is
    /// set, and builds the store.
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let rows = source_rows(&config)?;
        Self::from_rows(config, &rows)
    }

    pub fn from_rows(config: ServiceConfig, rows: &[RawRow]) -> anyhow::Result<Self> {
        let (store, report) = build(&config, rows)?;
        Ok(Self {
            engine: Arc::new(QueryEngine::with_padding(config.display_padding_mhz)),
            store: StoreHandle::new(store),
            report: Arc::new(Mutex::new(report)),
            config,
        })
    }

    /// Re-reads the dataset and swaps the store in one step. On failure the
    /// current store stays in place. Concurrent reloads run one at a time.
    pub fn reload(&self) -> anyhow::Result<BuildReport> {
        let mut current = self.report.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = source_rows(&self.config)?;
        let (store, report) = build(&self.config, &rows)?;
        self.store.replace(store);
        *current = report;
        Ok(report)
    }

    pub fn query(&self, params: &QueryParams) -> Result<QueryOutcome, InvalidQueryError> {
        let store = self.store.current();
        self.engine.run(&store, params)
    }

    pub fn execute(&self, query: &Query) -> QueryOutcome {
        let store = self.store.current();
        self.engine.execute(&store, query)
    }

    pub fn status(&self) -> ServiceStatus {
        let report = self.report.lock().unwrap_or_else(PoisonError::into_inner);
        ServiceStatus {
            records: self.store.current().len(),
            rows_read: report.rows_read,
            dropped_rows: report.dropped_rows,
            metrics: self.engine.metrics(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> Arc<RecordStore> {
        self.store.current()
    }
}

fn source_rows(config: &ServiceConfig) -> anyhow::Result<Vec<RawRow>> {
    match &config.dataset {
        Some(path) => load_rows(path),
        None if config.synthetic => {
            build_rows(&config.generator).context("generating synthetic dataset")
        }
        None => bail!("no dataset configured; pass --dataset <path> or --generate <rows>"),
    }
}

fn build(config: &ServiceConfig, rows: &[RawRow]) -> anyhow::Result<(RecordStore, BuildReport)> {
    let logger = LogManager::new("store");
    let (store, report) =
        build_store_with(rows, &config.columns).context("building record store")?;
    logger.record(&format!(
        "record store ready: {} records from {} rows",
        report.records, report.rows_read
    ));
    if report.dropped_rows > 0 {
        logger.warn(&format!(
            "skipped {} rows without usable coordinates, bandwidth or frequency",
            report.dropped_rows
        ));
    }
    Ok((store, report))
}
