//! Query parameters for paged listings.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{PageRequest, Sort, SortKey};

/// `?page=&size=&sort=field[,asc|desc]`
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct PageParams {
    /// Zero-based page index
    #[serde(default)]
    #[param(minimum = 0, example = 0)]
    pub page: u32,

    /// Items per page (max 100)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub size: u32,

    /// Sort field with optional direction, e.g. `price,desc`
    #[param(example = "id,asc")]
    pub sort: Option<String>,
}

fn default_page_size() -> u32 {
    20
}

impl PageParams {
    /// Resolves the sort parameter against the sortable fields of `K`.
    pub fn into_page_request<K: SortKey>(self) -> AppResult<PageRequest<K>> {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => Sort::default(),
            Some(raw) => raw.parse::<Sort<K>>().map_err(|reason| AppError::Validation {
                field: "sort".to_string(),
                reason,
            })?,
        };

        Ok(PageRequest {
            page: self.page,
            size: self.size,
            sort,
        })
    }
}
