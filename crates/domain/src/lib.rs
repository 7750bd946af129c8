//! # clapsense-domain
//!
//! Pure domain model for the clapsense clap-sensor adapter.
//!
//! ## Responsibilities
//! - Foundational types: string-backed identifiers, error conventions, timestamps
//! - Define **descriptions** (the declarative schema a device is built from)
//! - Define **values** (typed property values with validation and coercion)
//! - Define **snapshots** (serialized device/property state sent to the host)
//! - Define **events** (host notifications and inbound clap signals)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod description;
pub mod error;
pub mod event;
pub mod id;
pub mod snapshot;
pub mod time;
pub mod value;
