//! HTTP transport for CATMAID metadata requests.
//!
//! The [`AsyncHttpClient`] trait is the seam between the data source and the
//! network. [`ReqwestClient`] is the production implementation; tests inject
//! a mock that serves canned JSON bodies.

mod http;

pub use http::{sharded_url, AsyncHttpClient, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
