use anyhow::{bail, Context, Result};
use smartsearch_core::{is_blank, SearchResult};
use std::io::{self, Write};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::config::CliConfig;

pub async fn execute(config: CliConfig, query: String, format: OutputFormat) -> Result<()> {
    if is_blank(&query) {
        bail!("Query must not be blank");
    }

    let lookup = super::build_lookup(&config)?;
    let results = lookup.lookup(&query).await.context("Lookup failed")?;
    debug!(query = %query, count = results.len(), "lookup finished");

    let mut stdout = io::stdout().lock();
    write_results(&mut stdout, &results, format)?;
    Ok(())
}

pub fn write_results(
    out: &mut impl Write,
    results: &[SearchResult],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)?;
        }
        OutputFormat::Plain if results.is_empty() => writeln!(out, "No results found")?,
        OutputFormat::Plain => {
            for result in results {
                match (&result.category, &result.description) {
                    (Some(category), Some(description)) => {
                        writeln!(out, "{} [{}] {}", result.label, category, description)?
                    }
                    (Some(category), None) => writeln!(out, "{} [{}]", result.label, category)?,
                    (None, Some(description)) => writeln!(out, "{} {}", result.label, description)?,
                    (None, None) => writeln!(out, "{}", result.label)?,
                }
            }
        }
    }
    Ok(())
}
