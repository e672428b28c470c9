//! Fetcher module for downloading source images into local storage.
//!
//! The pipeline only depends on the `ImageFetcher` trait; `HttpFetcher` is the
//! production implementation backed by reqwest.

mod error;
mod http;
mod traits;

pub use error::FetchError;
pub use http::HttpFetcher;
pub use traits::ImageFetcher;
