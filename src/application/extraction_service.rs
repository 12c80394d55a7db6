//! Extraction service layer
//!
//! High-level coordination of extraction: document parsing, fetch glue for
//! the out-of-scope network collaborator, and the one documented post-hoc
//! record mutation (search-title enrichment).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::medicine::{FieldValue, MedicineDocument, MedicineRecord, ParsingReport};
use crate::domain::repositories::HtmlFetcher;
use crate::domain::schema::MedicineField;
use crate::infrastructure::parsing::{
    ContextualParser, DetailParseContext, MedicineDetailParser, ParsingConfig,
};
use crate::utils::strip_tags;

/// High-level extraction service
pub struct ExtractionService {
    parser: Arc<MedicineDetailParser>,
    config: ParsingConfig,
}

impl ExtractionService {
    /// Create a service with the given configuration
    pub fn new(config: ParsingConfig) -> Result<Self> {
        let parser = Arc::new(
            MedicineDetailParser::with_config(&config.detail_selectors)
                .context("Failed to create medicine detail parser")?,
        );
        Ok(Self { parser, config })
    }

    /// Create a service with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ParsingConfig::default())
    }

    pub fn parser(&self) -> &MedicineDetailParser {
        &self.parser
    }

    /// Extract a record and report from raw HTML.
    ///
    /// Total over its inputs: any internal failure is folded into a
    /// zero-match report rather than surfaced as an error.
    pub fn extract(&self, html: &str, source_url: &str) -> (MedicineRecord, ParsingReport) {
        debug!(url = source_url, "parsing medicine detail");

        let context =
            DetailParseContext::new(source_url).with_base_url(self.config.base_url.clone());
        match self.parser.parse_with_context(html, &context) {
            Ok(pair) => pair,
            Err(error) => {
                warn!(url = source_url, %error, "extraction failed before field scan");
                let mut report = ParsingReport::new(source_url);
                report.parsing_errors.push(error.to_string());
                report.recompute();
                (MedicineRecord::default(), report)
            }
        }
    }

    /// Extract into the serializable `{data, meta}` document shape.
    pub fn extract_document(&self, html: &str, source_url: &str) -> MedicineDocument {
        let (data, meta) = self.extract(html, source_url);
        MedicineDocument { data, meta }
    }

    /// Fetch a document through the network collaborator and extract it.
    ///
    /// The fetcher contract returns an empty string on failure, which
    /// degrades to a zero-match report here.
    pub async fn extract_from_url(
        &self,
        fetcher: &dyn HtmlFetcher,
        url: &str,
    ) -> MedicineDocument {
        let html = fetcher.fetch_html(url).await;
        if html.is_empty() {
            warn!(url, "fetcher returned no content");
        }
        self.extract_document(&html, url)
    }

    /// Post-hoc enrichment: fill a missing Korean name from an external
    /// search-result title.
    ///
    /// Search titles highlight matches with markup tags, which are stripped
    /// first. Applied at most once, immediately after extraction, and never
    /// inside `extract` itself. The report is recomputed so that the
    /// completeness accounting stays consistent with the appended field.
    pub fn apply_search_title(
        record: &mut MedicineRecord,
        report: &mut ParsingReport,
        title: &str,
    ) -> bool {
        if record.korean_name.is_some() {
            return false;
        }

        let cleaned = strip_tags(title);
        if !record.set(MedicineField::KoreanName, FieldValue::Text(cleaned)) {
            return false;
        }

        report.extracted_fields.push(MedicineField::KoreanName);
        report.recompute();
        info!(name = record.korean_name.as_deref().unwrap_or_default(), "applied search title as korean name");
        true
    }
}
