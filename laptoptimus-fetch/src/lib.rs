// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # LaptOptimus Fetch
//!
//! HTTP plumbing for the LaptOptimus search client.
//!
//! - [`client::HttpClient`] - reqwest wrapper with timeout, tracing, domain
//!   allowlist, and bounded retries
//! - [`retry::RetryStrategy`] - which failures are retried and how long to wait
//! - [`error::HttpError`] - transport-level errors
//!
//! ## Example
//!
//! ```ignore
//! use laptoptimus_fetch::{HttpClient, RetryStrategy};
//!
//! let client = HttpClient::new()?
//!     .with_allowed_domains(vec!["generativelanguage.googleapis.com".to_string()])
//!     .with_retry_strategy(RetryStrategy::new(2));
//!
//! let response = client.post_json(url, headers, &body).await?;
//! ```

pub mod client;
pub mod error;
pub mod retry;

pub use client::{HttpClient, ResponseExt};
pub use error::HttpError;
pub use retry::RetryStrategy;
