use std::sync::Arc;

use course_core::Catalog;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::identity::{IdentityProvider, MockIdentityProvider};
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// embedded catalog is invalid.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, Arc::new(MockIdentityProvider))
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the embedded catalog is invalid.
    pub fn in_memory() -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), Arc::new(MockIdentityProvider))
    }

    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the embedded catalog is invalid.
    pub fn from_storage(
        storage: &Storage,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::embedded()?);
        let progress = Arc::new(ProgressService::new(
            storage.progress_store(),
            Arc::clone(&catalog),
            identity,
        ));
        Ok(Self { catalog, progress })
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
