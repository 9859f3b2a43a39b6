//! HTTP inbound adapter exposing the download endpoints.

pub mod downloads;
pub mod error;
pub mod state;
pub mod validation;

pub use error::ApiResult;
