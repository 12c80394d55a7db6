//! Repository interfaces for the out-of-scope collaborators
//!
//! The extraction core performs no I/O itself. Fetching raw HTML and
//! persisting records are supplied by the host application through these
//! traits; this crate only defines the contracts.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::medicine::StoredMedicine;

/// Supplies raw HTML for a document URL.
///
/// Fetch failure is not propagated: implementations return an empty string,
/// which the extractor degrades to a zero-match report.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> String;
}

/// Backing store for extracted medicine records.
#[async_trait]
pub trait MedicineRepository: Send + Sync {
    /// Look up a stored record by its source URL. Used both for display and
    /// as the reference side of validation scoring.
    async fn find_by_url(&self, url: &str) -> Result<Option<StoredMedicine>>;

    /// Persist a record, inserting or replacing by URL.
    async fn save(&self, medicine: &StoredMedicine) -> Result<()>;

    /// Whether a URL has already been collected.
    async fn exists_by_url(&self, url: &str) -> Result<bool>;
}
