//! HTTP client for the directory API.
//!
//! Every collection is read through [`ApiClient::fetch`], which walks the
//! server's `Content-Range` pagination and retries throttled requests. The
//! typed accessors in this crate are thin filters on top of it.

pub use accounts::ACCOUNTS;
pub use client::{ApiClient, ApiClientBuilder, FetchPolicy, Filter};
pub use content_range::ContentRange;
pub use error::{ClientError, Result};
pub use groups::GROUPS;
pub use relationships::RELATIONSHIPS;

mod accounts;
mod auth;
mod client;
mod content_range;
mod error;
mod groups;
mod relationships;
