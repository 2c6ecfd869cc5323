use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Bounds on a single pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLimits {
    /// Maximum number of pages fetched per run (unbounded when absent)
    pub max_pages: Option<usize>,

    /// Fail when a next-link leads back to a page already visited in the run
    pub detect_cycles: bool,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            max_pages: None,
            detect_cycles: true,
        }
    }
}

impl PaginationLimits {
    /// No page cap and no cycle detection; a self-referencing next-link loops forever
    pub fn unbounded() -> Self {
        Self {
            max_pages: None,
            detect_cycles: false,
        }
    }
}

/// Tracks the pages of one run and enforces its limits.
///
/// A fresh guard is created per run, so nothing leaks between calls.
#[derive(Debug)]
pub(crate) struct PageGuard {
    limits: PaginationLimits,
    visited: HashSet<String>,
    pages: usize,
}

impl PageGuard {
    pub(crate) fn new(limits: PaginationLimits) -> Self {
        Self {
            limits,
            visited: HashSet::new(),
            pages: 0,
        }
    }

    /// Record that `url` is about to be fetched, or fail if that breaks a limit
    pub(crate) fn admit(&mut self, url: &Url) -> Result<()> {
        if let Some(limit) = self.limits.max_pages {
            if self.pages >= limit {
                ::log::warn!("Pagination stopped at {} pages before {}", limit, url);
                return Err(ExtractError::PaginationLimitExceeded { limit });
            }
        }

        if self.limits.detect_cycles && !self.visited.insert(normalize_url(url)) {
            ::log::warn!("Pagination revisited {}", url);
            return Err(ExtractError::PaginationCycle {
                url: url.to_string(),
            });
        }

        self.pages += 1;
        Ok(())
    }

    pub(crate) fn pages(&self) -> usize {
        self.pages
    }
}

/// Fragments never change what the server returns, so they are ignored when
/// comparing pages
fn normalize_url(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized.into()
}
