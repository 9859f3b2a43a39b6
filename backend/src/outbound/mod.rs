//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local downloader store, for tests and single-node runs
//! - **cache**: Redis-backed downloader store using a `bb8-redis` pool
//! - **user_service**: reqwest client for the external user limit service
//! - **cache_aside**: repository decorator that fills the cache from the user
//!   service on a miss
//!
//! Adapters translate between domain types and infrastructure
//! representations. The download rules themselves stay in the domain.

pub mod cache;
pub mod cache_aside;
pub mod memory;
pub mod user_service;
