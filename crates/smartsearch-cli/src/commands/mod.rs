pub mod interactive;
pub mod lookup;

use anyhow::Result;
use smartsearch_core::{Lookup, TimeoutLookup};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogLookup;
use crate::config::CliConfig;

/// Lookup backend described by `config`: the configured or built-in catalog,
/// optionally bounded by a timeout.
pub fn build_lookup(config: &CliConfig) -> Result<Arc<dyn Lookup>> {
    let catalog = match &config.catalog {
        Some(path) => CatalogLookup::from_json_file(path, config.latency())?,
        None => CatalogLookup::demo(config.latency()),
    };
    debug!(
        records = catalog.records().len(),
        latency_ms = config.latency_ms,
        "catalog ready"
    );

    let lookup: Arc<dyn Lookup> = Arc::new(catalog);
    Ok(match config.lookup_timeout() {
        Some(timeout) => Arc::new(TimeoutLookup::new(lookup, timeout)),
        None => lookup,
    })
}
