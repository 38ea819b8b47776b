//! # casita-domain
//!
//! Pure domain model for the casita home state mirror.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **Channel registry** (the closed set of device channels with
//!   their MQTT topic and payload vocabulary)
//! - Define **DeviceState** (the boolean snapshot of every channel)
//! - Contain the **reconciliation** rules that map inbound messages to state
//!   updates, including echo suppression for gate channels
//! - Render outbound **Commands** from user intents
//! - Define **Events** (state-change and link records)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod channel;
pub mod command;
pub mod event;
pub mod reconcile;
pub mod state;
