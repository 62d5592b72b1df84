use log::{debug, info, warn};

/// Routes messages through the `log` facade under a fixed component target,
/// so `RUST_LOG=store=debug` style filters pick out one part of the service.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.component, "{}", message);
    }

    /// Per-query chatter, kept at debug so it stays out of default output.
    pub fn detail(&self, message: &str) {
        debug!(target: self.component, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: self.component, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("spectrum")
    }
}

