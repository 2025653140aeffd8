use std::sync::Arc;

use course_core::Catalog;
use services::ProgressService;

pub trait UiApp: Send + Sync {
    fn app_name(&self) -> &str;

    fn catalog(&self) -> Arc<Catalog>;
    fn progress(&self) -> Arc<ProgressService>;
}

/// Explicitly provided progress context shared by every view.
#[derive(Clone)]
pub struct AppContext {
    app_name: String,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name().to_owned(),
            catalog: app.catalog(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
