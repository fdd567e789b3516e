//! Catalog loading service
//!
//! Turns delimited course lines into catalog entries, then runs one
//! validation pass over the batch.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::services::validation::{Eviction, ValidationQueue};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseTree};
use crate::infrastructure::traits::FileSystem;

/// Summary of one load operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Non-blank lines seen
    pub lines: usize,
    /// Records inserted before validation
    pub inserted: usize,
    /// Malformed lines that were skipped
    pub skipped: usize,
    /// Records removed by validation
    pub evicted: Vec<Eviction>,
    /// Catalog size after the load
    pub size: usize,
}

/// Service that fills a [`CourseTree`] from delimited text.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    delimiter: char,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>, delimiter: char) -> Self {
        Self { fs, delimiter }
    }

    /// Read `path` and load its records into `tree`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn load_file(&self, tree: &mut CourseTree, path: &Path) -> ApplicationResult<LoadReport> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog file", path)?;
        let report = self.load_str(tree, &content);
        info!(
            path = %path.display(),
            size = report.size,
            evicted = report.evicted.len(),
            "loaded catalog"
        );
        Ok(report)
    }

    /// Load every record in `content` into `tree`.
    ///
    /// Blank lines are ignored and malformed lines are skipped. Records with
    /// prerequisites are validated only after the whole batch is inserted.
    #[instrument(level = "debug", skip_all)]
    pub fn load_str(&self, tree: &mut CourseTree, content: &str) -> LoadReport {
        let mut report = LoadReport::default();
        let mut queue = ValidationQueue::new();

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            report.lines += 1;
            let course = match Course::parse_line(line, self.delimiter) {
                Ok(course) => course,
                Err(e) => {
                    warn!("skipping line: {}", e);
                    report.skipped += 1;
                    continue;
                }
            };

            let needs_validation = course.has_prerequisites();
            let handle = tree.insert(course);
            report.inserted += 1;
            if needs_validation {
                queue.push(handle);
            }
        }

        debug!(queued = queue.len(), "batch inserted, validating");
        report.evicted = queue.validate(tree).evicted;
        report.size = tree.len();
        report
    }
}
