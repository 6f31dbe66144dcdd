//! Backend REST gateway.
//!
//! One generic create/read/update/delete client per backend-held record
//! type, against `{base}/api/v1/{collection}`. Every call returns a
//! categorized [`ApiError`] on failure — call sites must branch on it;
//! nothing here retries or swallows.

pub mod client;
pub mod error;

pub use client::{Resource, ResourceClient};
pub use error::ApiError;
