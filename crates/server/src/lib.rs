//! HTTP front end for the recognition pipeline.

pub mod api;
pub mod metrics;
pub mod state;
