//! Shared storage contract types consumed by every repository trait.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Caller-supplied pagination options. All fields are optional; defaults come
/// from [`PaginationConfig`]. An explicit `offset` overrides the page-derived one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageRequest {
    /// The default first page.
    pub fn first() -> Self {
        Self::default()
    }

    pub fn of(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn resolve(&self, config: &PaginationConfig) -> ResolvedPage {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit);
        let offset = self
            .offset
            .map(|offset| offset as usize)
            .unwrap_or(((page - 1) * limit) as usize);
        ResolvedPage {
            page,
            limit,
            offset,
        }
    }
}

/// A [`PageRequest`] with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    pub page: u32,
    pub limit: u32,
    pub offset: usize,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty(request: &PageRequest, config: &PaginationConfig) -> Self {
        Self::paginate(Vec::new(), request, config)
    }

    /// Slice an already-filtered, already-ordered result set into one page.
    pub fn paginate(items: Vec<T>, request: &PageRequest, config: &PaginationConfig) -> Self {
        let total = items.len();
        let resolved = request.resolve(config);
        let data: Vec<T> = items
            .into_iter()
            .skip(resolved.offset)
            .take(resolved.limit as usize)
            .collect();
        let total_pages = total.div_ceil(resolved.limit as usize) as u32;

        Self {
            data,
            total,
            page: resolved.page,
            limit: resolved.limit,
            total_pages,
        }
    }
}
