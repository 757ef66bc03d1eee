//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The page number, starting at 1.
    pub page: u64,
    /// The maximum number of items on a page.
    pub per_page: u64,
}

impl PageRequest {
    /// Parse the `page` and `perPage` query parameters, falling back to the
    /// defaults in `config` when a parameter is missing or empty.
    ///
    /// # Errors
    /// Returns a [Error::InvalidPageNumber] or [Error::InvalidPageSize] if
    /// the respective parameter is not an integer greater than zero.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = parse_positive(page, config.default_page)
            .map_err(|text| Error::InvalidPageNumber(text.to_owned()))?;
        let per_page = parse_positive(per_page, config.default_page_size)
            .map_err(|text| Error::InvalidPageSize(text.to_owned()))?;

        Ok(Self { page, per_page })
    }

    /// The number of items before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn parse_positive(text: Option<&str>, default: u64) -> Result<u64, &str> {
    match text.map(str::trim) {
        None | Some("") => Ok(default),
        Some(text) => match text.parse::<u64>() {
            Ok(number) if number > 0 => Ok(number),
            _ => Err(text),
        },
    }
}
