//! Per-user download limits backed by a Redis cache and an external user
//! limit service.
//!
//! - `domain`: the downloader aggregate, ports and the download use case.
//! - `inbound`: the actix-web HTTP adapter.
//! - `outbound`: Redis, in-memory, user service and cache-aside adapters.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
pub mod stack;
