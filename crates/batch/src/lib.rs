#![deny(missing_docs)]
//! Parallel link verification over many markdown documents.

/// Batch result types.
pub mod report;

pub use report::{BatchReport, BatchStats, DocumentReport};

use linkvet_core::{
    Document, LinkCheckError, VerifyLinkError, VerifyOptions, document::normalize_path,
    filetypes::extension_of, scan_file_for_links, verify_links,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Options for batch processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
}

/// Verifies every markdown document in `documents` (paths relative to `base`).
///
/// Documents are scanned and verified in parallel; reports come back in input
/// order. Paths whose extension is not a recognized document type are
/// skipped. A fatal error in one document is recorded on its report and does
/// not stop the others.
pub fn verify_documents<P>(
    base: &Path,
    documents: Vec<P>,
    options: &VerifyOptions,
    batch: BatchOptions,
) -> Result<BatchReport, LinkCheckError>
where
    P: Into<PathBuf>,
{
    let start = Instant::now();
    if !base.is_absolute() {
        return Err(LinkCheckError::InvalidBasePath(base.to_path_buf()));
    }
    let base = normalize_path(base);

    let total = documents.len();
    let inputs: Vec<PathBuf> = documents
        .into_iter()
        .map(Into::into)
        .filter(|path: &PathBuf| {
            let keep = extension_of(path).is_some_and(|ext| options.is_doc_extension(&ext));
            if !keep {
                log::debug!("skipping non-document {}", path.display());
            }
            keep
        })
        .collect();
    let skipped = total.saturating_sub(inputs.len());

    // Configure thread pool if max_threads is specified
    let pool = batch.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("falling back to the global pool: {err}"))
            .ok()
    });

    let clean = AtomicUsize::new(0);
    let with_errors = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process = |path: PathBuf| -> DocumentReport {
        match verify_one(&base, &path, options) {
            Ok(errors) => {
                let counter = if errors.is_empty() { &clean } else { &with_errors };
                counter.fetch_add(1, Ordering::Relaxed);
                DocumentReport {
                    path,
                    errors,
                    failure: None,
                }
            }
            Err((errors, err)) => {
                log::warn!("{}: {err}", path.display());
                failed.fetch_add(1, Ordering::Relaxed);
                DocumentReport {
                    path,
                    errors,
                    failure: Some(err.to_string()),
                }
            }
        }
    };

    let reports: Vec<DocumentReport> = match pool {
        Some(pool) => pool.install(|| inputs.into_par_iter().map(process).collect()),
        None => inputs.into_par_iter().map(process).collect(),
    };

    Ok(BatchReport {
        reports,
        stats: BatchStats {
            total,
            skipped,
            clean: clean.load(Ordering::Relaxed),
            with_errors: with_errors.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    })
}

/// Scans and verifies one document. On a fatal error, the link errors
/// collected before it are returned alongside.
fn verify_one(
    base: &Path,
    path: &Path,
    options: &VerifyOptions,
) -> Result<Vec<VerifyLinkError>, (Vec<VerifyLinkError>, LinkCheckError)> {
    let document = Document::read(base, path).map_err(|err| (Vec::new(), err))?;
    let links = scan_file_for_links(&document, &options.scan_options())
        .map_err(|err| (Vec::new(), err))?;

    let mut errors = Vec::new();
    let verifier = verify_links(base, &document, links, options).map_err(|err| (Vec::new(), err))?;
    for result in verifier {
        match result {
            Ok(error) => errors.push(error),
            Err(err) => return Err((errors, err)),
        }
    }
    Ok(errors)
}
