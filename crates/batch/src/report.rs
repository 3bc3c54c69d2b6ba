//! Batch result types.

use linkvet_core::VerifyLinkError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Verification result for one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Document path, relative to the base directory.
    pub path: PathBuf,
    /// Broken links, in document order.
    pub errors: Vec<VerifyLinkError>,
    /// Fatal error that stopped verification of this document.
    pub failure: Option<String>,
}

impl DocumentReport {
    /// True when the document verified completely and every link resolved.
    pub fn is_clean(&self) -> bool {
        self.failure.is_none() && self.errors.is_empty()
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "{} [OK]", self.path.display());
        }

        write!(f, "--- {} ---", self.path.display())?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        if let Some(failure) = &self.failure {
            write!(f, "\nfailed: {failure}")?;
        }
        Ok(())
    }
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of documents handed in.
    pub total: usize,
    /// Documents skipped because their extension is not a document type.
    pub skipped: usize,
    /// Documents with no broken links.
    pub clean: usize,
    /// Documents with at least one broken link.
    pub with_errors: usize,
    /// Documents that failed fatally.
    pub failed: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Result of a batch run: one report per verified document, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-document reports.
    pub reports: Vec<DocumentReport>,
    /// Aggregate counts.
    pub stats: BatchStats,
}

impl BatchReport {
    /// Whether any document had a broken link or failed to verify.
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|report| !report.is_clean())
    }

    /// Total number of broken links across all documents.
    pub fn error_count(&self) -> usize {
        self.reports.iter().map(|report| report.errors.len()).sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, report) in self.reports.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{report}")?;
        }
        Ok(())
    }
}
