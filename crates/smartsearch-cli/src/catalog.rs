//! Demo lookup backend: an in-memory list of banking records searched by
//! label, with simulated network latency.

use async_trait::async_trait;
use smartsearch_core::{Category, Lookup, LookupError, SearchResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Case-insensitive label search over a fixed set of records.
#[derive(Debug, Clone)]
pub struct CatalogLookup {
    records: Vec<SearchResult>,
    latency: Duration,
}

impl CatalogLookup {
    pub fn new(records: Vec<SearchResult>, latency: Duration) -> Self {
        Self { records, latency }
    }

    /// The built-in banking records.
    pub fn demo(latency: Duration) -> Self {
        Self::new(demo_records(), latency)
    }

    /// Records from a JSON array file.
    pub fn from_json_file(path: &Path, latency: Duration) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SearchResult> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), count = records.len(), "loaded catalog");
        Ok(Self::new(records, latency))
    }

    pub fn records(&self) -> &[SearchResult] {
        &self.records
    }

    /// Records whose label contains `query`, ignoring case, in catalog order.
    pub fn matches(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Lookup for CatalogLookup {
    async fn lookup(&self, query: &str) -> Result<Vec<SearchResult>, LookupError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.matches(query))
    }
}

fn record(id: &str, label: &str, description: &str, category: Category) -> SearchResult {
    SearchResult::new(id, label)
        .with_description(description)
        .with_category(category)
}

pub fn demo_records() -> Vec<SearchResult> {
    use Category::*;

    vec![
        record("1", "HDFC Savings Account - 1234", "$85,000 balance • Active", Account),
        record("2", "ICICI Current Account - 5678", "$2,45,000 balance • Business", Account),
        record("3", "SBI Fixed Deposit - 9012", "$5,00,000 • Matures 2025-12-15", Account),
        record("4", "Axis Bank Credit Card - 3456", "$50,000 limit • ₹12,000 outstanding", Account),
        record("5", "Kotak Salary Account - 7890", "$65,000 balance • Premium", Account),
        record("6", "Priya Sharma", "Customer ID: CU001 • Gold Member", Customer),
        record("7", "Rajesh Kumar", "Customer ID: CU002 • Business Banking", Customer),
        record("8", "Anita Patel", "Customer ID: CU003 • NRI Account Holder", Customer),
        record("9", "Mohammed Ali", "Customer ID: CU004 • Priority Banking", Customer),
        record("10", "Deepika Singh", "Customer ID: CU005 • Student Account", Customer),
        record("11", "UPI Transfer #TXN001", "$2,500 to phonepe@ybl • Today 2:30 PM", Transaction),
        record("12", "ATM Withdrawal #TXN002", "$5,000 from HDFC ATM • Yesterday", Transaction),
        record("13", "Online Payment #TXN003", "$12,450 to Amazon • Card ending 1234", Transaction),
        record("14", "Salary Credit #TXN004", "$75,000 from TechCorp Ltd • 1st Oct", Transaction),
        record("15", "EMI Debit #TXN005", "$15,000 Home Loan EMI • Auto-debit", Transaction),
        record("16", "Home Loan - HL2024001", "$25,00,000 principal • 15 years remaining", Loan),
        record("17", "Car Insurance Policy", "Policy #IN789 • Expires 2025-03-15", Insurance),
        record("18", "Mutual Fund SIP - MF001", "$5,000/month • Equity Diversified", Investment),
        record("19", "Branch: Connaught Place", "IFSC: HDFC0000123 • Delhi • Open till 6 PM", Branch),
        record("20", "Debit Card - 4532****1234", "Platinum • Expires 12/26 • Active", Card),
    ]
}
