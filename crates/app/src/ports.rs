//! Port definitions — traits at the boundaries of the application core.
//!
//! Ports replace the host framework's base-class chain: instead of
//! subclassing `Adapter`/`Device`/`Property`, the core holds references to
//! capability implementations. They are defined here (in `app`) so that both
//! the core and the adapter crates can depend on them without creating
//! circular dependencies.

pub mod clap_source;
pub mod host;

pub use clap_source::ClapSource;
pub use host::DeviceHost;
