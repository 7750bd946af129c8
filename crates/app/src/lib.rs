//! # clapsense-app
//!
//! Application layer — the adapter/device/property core and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters and hosts implement:
//!   - [`ports::DeviceHost`] — the host-side notification channel
//!     (device added/removed, property changed)
//!   - [`ports::ClapSource`] — the clap-detection event stream
//! - Implement the core types:
//!   - [`adapter::ClapSensorAdapter`] — device registry + two-phase pairing
//!   - [`device::ClapSensor`] — materialises properties from a description
//!   - [`property::ToggleProperty`] — boolean value toggled by clap events
//! - Provide **in-process infrastructure** ([`host_bus::InProcessHostBus`])
//!   that doesn't need IO
//! - Provide the [`loader`] entry point that wires a pre-provisioned sensor
//!
//! ## Dependency rule
//! Depends on `clapsense-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod adapter;
pub mod device;
pub mod host_bus;
pub mod loader;
pub mod ports;
pub mod property;
