use std::sync::Arc;

use crate::bus::AsyncEventBus;
use crate::config::BusConfig;
use crate::reporters::{LogReporter, Report};

/// Builder for constructing an [`AsyncEventBus`].
pub struct BusBuilder {
    cfg: BusConfig,
    reporter: Option<Arc<dyn Report>>,
}

impl BusBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: BusConfig) -> Self {
        Self {
            cfg,
            reporter: None,
        }
    }

    /// Sets the failure sink. Defaults to [`LogReporter`].
    pub fn with_reporter(mut self, reporter: Arc<dyn Report>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds the bus and spawns its error reporter task.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn build(self) -> AsyncEventBus {
        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(LogReporter::new()));
        AsyncEventBus::start(self.cfg, reporter)
    }
}
