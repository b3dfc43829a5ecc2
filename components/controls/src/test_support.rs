//! Observes the warnings a switch reports through `tracing`.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::{Event, Level, Subscriber, subscriber::DefaultGuard};
use tracing_subscriber::{
    layer::{Context, Layer},
    prelude::*,
};

/// Counts `WARN` events emitted by the switch.
#[derive(Debug, Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::SeqCst);
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::WARN && metadata.target() == "waterswitch::switch" {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs a counting subscriber for the current thread.
pub fn capture_warnings() -> (WarnCounter, DefaultGuard) {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    (counter, tracing::subscriber::set_default(subscriber))
}
