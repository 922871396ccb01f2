//! Offset pagination for list queries.

use crate::config::{DEFAULT_LIMIT, DEFAULT_SKIP};
use crate::errors::{AppError, AppResult};

/// Offset-based page request (`limit` records after skipping `skip`).
///
/// A limit of zero means "no limit", matching document-store semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub skip: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: DEFAULT_SKIP,
        }
    }
}

impl PageRequest {
    pub fn new(limit: u64, skip: u64) -> Self {
        Self { limit, skip }
    }

    /// Build a page request from optional, possibly negative API arguments.
    pub fn from_args(limit: Option<i32>, skip: Option<i32>) -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            limit: non_negative("limit", limit)?.unwrap_or(defaults.limit),
            skip: non_negative("skip", skip)?.unwrap_or(defaults.skip),
        })
    }

    /// Row limit for the query, `None` when unbounded
    pub fn limit(&self) -> Option<u64> {
        (self.limit > 0).then_some(self.limit)
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        self.skip
    }

    /// Apply this page to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(self.skip as usize);
        match self.limit() {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}

fn non_negative(name: &str, value: Option<i32>) -> AppResult<Option<u64>> {
    match value {
        Some(v) if v < 0 => Err(AppError::validation(format!("{} must not be negative", name))),
        Some(v) => Ok(Some(v as u64)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::from_args(None, None).unwrap();
        assert_eq!(page, PageRequest::new(10, 0));
    }

    #[test]
    fn test_explicit_values() {
        let page = PageRequest::from_args(Some(2), Some(1)).unwrap();
        assert_eq!(page.limit(), Some(2));
        assert_eq!(page.offset(), 1);
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(matches!(
            PageRequest::from_args(Some(-1), None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            PageRequest::from_args(None, Some(-5)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let page = PageRequest::new(0, 2);
        assert_eq!(page.limit(), None);
        assert_eq!(page.slice(1..=5), vec![3, 4, 5]);
    }

    #[test]
    fn test_slice_skips_then_limits() {
        let page = PageRequest::new(2, 1);
        assert_eq!(page.slice(vec!["a", "b", "c", "d", "e"]), vec!["b", "c"]);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let page = PageRequest::new(10, 50);
        assert!(page.slice(0..5).is_empty());
    }
}
