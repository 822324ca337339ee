//! Offset pagination shared by every list query.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{Result, ValidationError};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page: i64,
    pub size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Builds a validated page request.
    pub fn new(page: i64, size: i64) -> Result<Self> {
        let page = Self { page, size };
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ValidationError::InvalidInput("page must be >= 1".to_string()).into());
        }
        if self.size < 1 || self.size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidInput(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            ))
            .into());
        }
        Ok(())
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    pub total: i64,
    pub list: Vec<T>,
}

impl<T> PagedList<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        Self { total, list }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            total: self.total,
            list: self.list.into_iter().map(f).collect(),
        }
    }
}
