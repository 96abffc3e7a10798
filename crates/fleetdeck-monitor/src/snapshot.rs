//! The health snapshot and its pagination view.

use fleetdeck_core::Project;

/// Merged fleet state produced by one reconciliation cycle.
///
/// Owned exclusively by the reconciliation loop and replaced wholesale
/// on each successful cycle; a failed cycle leaves the prior snapshot
/// and timestamp untouched. Projects keep registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthSnapshot {
    pub projects: Vec<Project>,
    /// Unix timestamp (seconds) of the last successful reconciliation.
    pub checked_at: Option<u64>,
    /// True until the first cycle has completed, success or failure.
    pub loading: bool,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            checked_at: None,
            loading: true,
        }
    }
}

/// One page of the fleet view. Derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub projects: Vec<Project>,
    /// 1-based page number this view was computed for.
    pub page: usize,
    pub total_pages: usize,
}

impl HealthSnapshot {
    /// Total page count for the given page size.
    pub fn total_pages(&self, page_size: usize) -> usize {
        self.projects.len().div_ceil(page_size.max(1))
    }

    /// Slice of projects for a 1-based page number. Pages past the end
    /// are empty rather than an error.
    pub fn page(&self, page: usize, page_size: usize) -> PageView {
        let page_size = page_size.max(1);
        let start = page.saturating_sub(1) * page_size;
        let end = (start + page_size).min(self.projects.len());
        let projects = if start < end {
            self.projects[start..end].to_vec()
        } else {
            Vec::new()
        };
        PageView {
            projects,
            page,
            total_pages: self.total_pages(page_size),
        }
    }
}
