//! Session-scoped data cache and dashboard session
//!
//! A session loads each visit file once and hands out the same shared,
//! immutable table on every later request. Nothing is cached globally;
//! dropping the session drops its tables, and `invalidate` forces a reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rustc_hash::FxHashMap;

use crate::algorithm::dashboard::{
    DashboardReport, DateRange, FilterOptions, MetricSelection, VisitFilter,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::table::VisitTable;
use crate::utils::io::read_visits;

/// Loaded visit tables keyed by file path
#[derive(Debug, Default)]
pub struct DataCache {
    tables: FxHashMap<PathBuf, Arc<VisitTable>>,
}

impl DataCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table of `path`, loading it on first use
    ///
    /// A failed load leaves the cache unchanged.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<VisitTable>> {
        if let Some(table) = self.tables.get(path) {
            debug!("Using cached visits for {}", path.display());
            return Ok(Arc::clone(table));
        }

        debug!("No cached visits for {}, reading the file", path.display());
        let table = Arc::new(read_visits(path)?);
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table of `path`; returns whether one was cached
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.tables.remove(path).is_some()
    }

    /// Drop every cached table
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Whether a table for `path` is cached
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.tables.contains_key(path)
    }

    /// Number of cached tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// One operator's dashboard session over the configured visit file
#[derive(Debug)]
pub struct DashboardSession {
    config: DashboardConfig,
    cache: DataCache,
}

impl DashboardSession {
    /// Create a session; nothing is loaded until first use
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: DataCache::new(),
        }
    }

    /// The session configuration
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The session's table, loaded on first call
    pub fn table(&mut self) -> Result<Arc<VisitTable>> {
        let path = self.config.data_path.clone();
        self.cache.get_or_load(&path)
    }

    /// Options offered by the filter controls
    pub fn filter_options(&mut self) -> Result<FilterOptions> {
        let table = self.table()?;
        Ok(FilterOptions::from_table(&table))
    }

    /// Filter selecting everything over the full date range
    pub fn default_filter(&mut self) -> Result<VisitFilter> {
        let table = self.table()?;
        Ok(VisitFilter::select_all(&table))
    }

    /// Date range with missing bounds taken from the table
    pub fn date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange> {
        let table = self.table()?;
        Ok(DateRange::resolve(&table, start, end))
    }

    /// Compute the dashboard for one filter selection
    pub fn report(
        &mut self,
        filter: &VisitFilter,
        metrics: MetricSelection,
    ) -> Result<DashboardReport> {
        let table = self.table()?;
        Ok(DashboardReport::build(&table, filter, metrics, &self.config))
    }

    /// Forget the loaded table so the next request reads the file again
    pub fn reload(&mut self) {
        self.cache.clear();
    }
}
