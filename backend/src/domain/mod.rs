//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: hold the download-limit rules independently of any storage or
//! transport. Nothing in here knows about Redis or HTTP; adapters in
//! `inbound` and `outbound` plug into the traits declared under [`ports`].
//!
//! Public surface:
//! - `UserId`, `ResourceId`: validated opaque identifiers.
//! - `ResourceDownloader`: per-user download history and limit.
//! - `DownloadService`: the download use cases over a repository port.
//! - `DomainError`, `ErrorCode`: transport-agnostic error payload.

pub mod download_service;
pub mod downloader;
pub mod error;
pub mod identifiers;
pub mod ports;

pub use self::download_service::DownloadService;
pub use self::downloader::{LimitReached, ResourceDownloader};
pub use self::error::{DomainError, EmptyErrorMessage, ErrorCode};
pub use self::identifiers::{IdentifierValidationError, ResourceId, UserId};
