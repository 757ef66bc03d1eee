//! The view state of the dashboard and the transitions between states.
//!
//! The state is carried in the page URL so that every link on the page is
//! built from a transition applied to the current state.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, month::parse_month};

/// The month shown when the dashboard is first opened.
pub(super) const DEFAULT_MONTH: Month = Month::March;

/// Which parts of the dashboard need to be re-rendered.
///
/// Only the table depends on the search text, so a change of search alone
/// leaves the tiles and chart as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Refresh {
    /// The transaction table, the statistic tiles and the bar chart.
    All,
    /// Only the transaction table.
    TableOnly,
}

/// The month, page and search text the dashboard is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct ViewState {
    /// The selected month, 1 to 12.
    pub month: u8,
    /// The selected year, the current year when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// The 1-based page of the transaction table.
    pub page: u64,
    /// The text the transaction table is filtered by.
    pub search: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            month: DEFAULT_MONTH as u8,
            year: None,
            page: 1,
            search: String::new(),
        }
    }
}

/// The raw dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// A month number or English month name.
    pub month: Option<String>,
    /// The year of the month.
    pub year: Option<String>,
    /// The 1-based page of the transaction table.
    pub page: Option<String>,
    /// The text to filter the transaction table by.
    pub search: Option<String>,
}

impl ViewState {
    /// Build the state described by `query`, using the initial state for missing parameters.
    ///
    /// # Errors
    /// Returns an error if the month, year or page cannot be parsed.
    pub(super) fn from_query(query: &DashboardQuery) -> Result<Self, Error> {
        let initial = Self::default();

        let month = match non_empty(query.month.as_deref()) {
            Some(month) => parse_month(month)? as u8,
            None => initial.month,
        };

        let year = non_empty(query.year.as_deref())
            .map(|year| {
                year.parse::<i32>()
                    .map_err(|_| Error::InvalidYear(year.to_owned()))
            })
            .transpose()?;

        let page = match non_empty(query.page.as_deref()) {
            Some(page) => match page.parse::<u64>() {
                Ok(page) if page > 0 => page,
                _ => return Err(Error::InvalidPageNumber(page.to_owned())),
            },
            None => initial.page,
        };

        let state = Self {
            month,
            year,
            page,
            ..initial
        };

        Ok(state.with_search(query.search.as_deref().unwrap_or_default()))
    }

    /// Select `month`, going back to the first page.
    pub(super) fn with_month(&self, month: u8) -> Self {
        Self {
            month,
            page: 1,
            ..self.clone()
        }
    }

    /// Filter the table by `search`.
    pub(super) fn with_search(&self, search: &str) -> Self {
        Self {
            search: search.trim().to_owned(),
            ..self.clone()
        }
    }

    /// Go to the next page.
    pub(super) fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Go to the previous page, staying on the first page.
    pub(super) fn previous_page(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self.clone()
        }
    }

    /// The state as URL query parameters.
    pub(super) fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}
