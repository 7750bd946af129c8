//! # clapsense-adapter-sim
//!
//! Simulated clap-detection source. Stands in for a real microphone-backed
//! detector: claps are injected programmatically (tests) or fired on an
//! interval (demos), and delivered to subscribers over the same channel a
//! real detector would use.
//!
//! ## Dependency rule
//!
//! Depends on `clapsense-app` (port traits) and `clapsense-domain` only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use clapsense_app::ports::ClapSource;
use clapsense_domain::error::ClapSenseError;
use clapsense_domain::event::ClapEvent;

/// A [`ClapSource`] fed by hand instead of by audio.
///
/// Claps injected before [`start`](ClapSource::start) are dropped — the
/// detector is not sensing yet.
pub struct SimClapSource {
    sender: broadcast::Sender<ClapEvent>,
    started: Arc<AtomicBool>,
}

impl SimClapSource {
    /// Create a source with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for injecting synthetic claps.
    #[must_use]
    pub fn injector(&self) -> ClapInjector {
        ClapInjector {
            sender: self.sender.clone(),
            started: Arc::clone(&self.started),
        }
    }

    /// Spawn a background task that fires one synthetic clap per `period`.
    ///
    /// Returns the task handle so the caller can stop the clapper.
    #[must_use]
    pub fn spawn_interval(&self, period: Duration) -> JoinHandle<()> {
        let injector = self.injector();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; skip it so claps start one
            // period after spawning.
            interval.tick().await;
            loop {
                interval.tick().await;
                injector.clap();
            }
        })
    }
}

impl ClapSource for SimClapSource {
    fn start(&self) -> Result<(), ClapSenseError> {
        if !self.started.swap(true, Ordering::SeqCst) {
            tracing::info!("simulated clap detection started");
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ClapEvent> {
        self.sender.subscribe()
    }
}

/// Cloneable handle that publishes synthetic claps into a [`SimClapSource`].
#[derive(Clone)]
pub struct ClapInjector {
    sender: broadcast::Sender<ClapEvent>,
    started: Arc<AtomicBool>,
}

impl ClapInjector {
    /// Fire one synthetic clap. Returns whether the detector was sensing
    /// (claps before `start()` are dropped).
    pub fn clap(&self) -> bool {
        if !self.started.load(Ordering::SeqCst) {
            tracing::debug!("clap injected before start, dropped");
            return false;
        }
        // send fails only with zero subscribers; the clap is still "sensed".
        let _ = self.sender.send(ClapEvent::new());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_injected_clap_to_subscriber() {
        let source = SimClapSource::new(16);
        source.start().unwrap();
        let mut rx = source.subscribe();

        assert!(source.injector().clap());
        let clap = rx.recv().await.unwrap();
        assert!(clap.at <= clapsense_domain::time::now());
    }

    #[tokio::test]
    async fn should_drop_claps_before_start() {
        let source = SimClapSource::new(16);
        let mut rx = source.subscribe();

        assert!(!source.injector().clap());
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn should_be_idempotent_on_repeated_start() {
        let source = SimClapSource::new(16);
        source.start().unwrap();
        source.start().unwrap();

        let mut rx = source.subscribe();
        source.injector().clap();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn should_fan_out_to_every_subscriber() {
        let source = SimClapSource::new(16);
        source.start().unwrap();
        let mut rx1 = source.subscribe();
        let mut rx2 = source.subscribe();

        source.injector().clap();
        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn should_fire_interval_claps() {
        let source = SimClapSource::new(16);
        source.start().unwrap();
        let mut rx = source.subscribe();

        let clapper = source.spawn_interval(Duration::from_secs(5));
        tokio::time::advance(Duration::from_secs(11)).await;

        assert!(rx.recv().await.is_ok());
        assert!(rx.recv().await.is_ok());
        clapper.abort();
    }
}
