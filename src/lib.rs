//! ActorLens - WebFinger + ActivityPub client for resolving federated
//! handles to display profiles
//!
//! # Architecture
//!
//! ```text
//! identifier ("@alice@example.com" or "https://.../users/alice")
//!      │
//!      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Resolution Orchestrator                      │
//! │  - URL vs handle dispatch                                   │
//! │  - WebFinger discovery (handles only)                       │
//! │  - Actor document fetch                                     │
//! │  - Normalization                                            │
//! └─────────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//! RemoteProfile { username, avatar_url, bio, source_url }
//! ```
//!
//! Each resolution is independent and stateless; concurrent resolutions
//! need no coordination. Dropping a resolution future aborts its
//! in-flight HTTP request.
//!
//! # Modules
//!
//! - `resolver`: handle parsing, WebFinger, actor fetch, normalization,
//!   orchestration, and the caller-owned profile cache
//! - `config`: configuration management
//! - `error`: error types
//! - `metrics`: Prometheus instruments

pub mod config;
pub mod error;
pub mod metrics;
pub mod resolver;

pub use error::{AppError, Result};
pub use resolver::{ProfileCache, ProfileResolver, RemoteProfile};
