//! # casita-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CommandPublisher` — hand rendered commands to the transport
//!   - `EventPublisher` — publish domain events to interested subscribers
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StateService` — fold inbound transport messages into the snapshot
//!   - `CommandService` — resolve a user intent and publish the command
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* the transport works
//!
//! ## Dependency rule
//! Depends on `casita-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
