//! # casita-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for reading the mirror and sending commands
//!   (`/api/state`, `/api/channels`, `/api/channels/{channel}`)
//! - Stream domain events over **SSE** (`/api/events`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `casita-app` (for port traits and services) and `casita-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
