//! Clap-source port — the inbound stream of detected claps.

use tokio::sync::broadcast;

use clapsense_domain::error::ClapSenseError;
use clapsense_domain::event::ClapEvent;

/// A source of clap events.
///
/// Each property takes its own receiver and consumes events from it, which
/// keeps sensing decoupled from toggling and lets tests inject synthetic
/// claps.
pub trait ClapSource: Send + Sync {
    /// Begin sensing. Idempotent; called once at load time.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying detector cannot be started.
    fn start(&self) -> Result<(), ClapSenseError>;

    /// Subscribe to clap events delivered *after* this call.
    fn subscribe(&self) -> broadcast::Receiver<ClapEvent>;
}

impl<T: ClapSource + ?Sized> ClapSource for std::sync::Arc<T> {
    fn start(&self) -> Result<(), ClapSenseError> {
        (**self).start()
    }

    fn subscribe(&self) -> broadcast::Receiver<ClapEvent> {
        (**self).subscribe()
    }
}
