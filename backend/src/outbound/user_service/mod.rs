//! User service outbound adapter.
//!
//! Thin HTTP implementation of the `UserLimitSource` port.

mod dto;
mod http_source;

pub use http_source::HttpUserLimitSource;
