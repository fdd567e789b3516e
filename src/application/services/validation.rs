//! Prerequisite validation pass
//!
//! Evicts catalog entries whose prerequisite ids do not resolve.

use std::collections::VecDeque;

use tracing::{debug, info, instrument};

use crate::domain::{Course, CourseHandle, CourseTree};

/// A course removed because one of its prerequisites is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction {
    /// The removed record
    pub course: Course,
    /// First prerequisite id that did not resolve
    pub missing: String,
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Queue entries processed
    pub checked: usize,
    /// Courses removed, in queue order
    pub evicted: Vec<Eviction>,
}

/// FIFO of freshly inserted nodes that declare prerequisites.
///
/// Filled during a load batch and drained once after the batch completes,
/// so a course may reference one that appears later in the same input.
/// `validate` consumes the queue, which makes a second drain impossible.
#[derive(Debug, Default)]
pub struct ValidationQueue {
    pending: VecDeque<CourseHandle>,
}

impl ValidationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: CourseHandle) {
        self.pending.push_back(handle);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Check every queued course against `tree` and remove those with an
    /// unresolved prerequisite.
    ///
    /// Prerequisites are checked in declared order and the first miss evicts
    /// the course. Handles that are no longer live are skipped.
    #[instrument(level = "debug", skip_all, fields(queued = self.pending.len()))]
    pub fn validate(self, tree: &mut CourseTree) -> ValidationReport {
        let mut report = ValidationReport::default();

        for handle in self.pending {
            report.checked += 1;

            let missing = match tree.get(handle) {
                Some(course) => course
                    .prerequisites()
                    .iter()
                    .find(|prerequisite| !tree.contains(prerequisite))
                    .cloned(),
                None => {
                    debug!(?handle, "skipping handle that is no longer in the catalog");
                    continue;
                }
            };

            let Some(missing) = missing else {
                continue;
            };

            if let Ok(course) = tree.remove(handle) {
                info!(
                    id = course.id(),
                    missing = missing.as_str(),
                    "evicting course with unresolved prerequisite"
                );
                report.evicted.push(Eviction { course, missing });
            }
        }

        debug!(
            checked = report.checked,
            evicted = report.evicted.len(),
            "validation pass complete"
        );
        report
    }
}
