use std::sync::Arc;

use services::{ExportSink, GeneratorService};

pub trait UiApp: Send + Sync {
    fn generator(&self) -> Arc<GeneratorService>;
    fn export_sink(&self) -> Arc<dyn ExportSink>;
}

#[derive(Clone)]
pub struct AppContext {
    generator: Arc<GeneratorService>,
    export_sink: Arc<dyn ExportSink>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            generator: app.generator(),
            export_sink: app.export_sink(),
        }
    }

    #[must_use]
    pub fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    #[must_use]
    pub fn export_sink(&self) -> Arc<dyn ExportSink> {
        Arc::clone(&self.export_sink)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
