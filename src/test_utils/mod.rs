#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod store;

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use store::{InMemoryTransactionStore, price_text, sqlite_state, test_state};
