// src/state.rs
use std::sync::Arc;

use crate::config::{BackendMode, Config};
use crate::services::credential_store::CredentialStore;
use crate::services::inference::{HuggingFaceBackend, InferenceBackend, OllamaBackend};

pub type SharedState = Arc<AppState>;

/// Built once in `main`, read-only afterwards.
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialStore,
    pub local: Arc<dyn InferenceBackend>,
    pub remote: Arc<dyn InferenceBackend>,
}

impl AppState {
    pub fn new(
        config: Config,
        credentials: CredentialStore,
        local: Arc<dyn InferenceBackend>,
        remote: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self { config, credentials, local, remote }
    }

    /// Real backends from config, credentials from the configured file.
    pub async fn from_config(config: Config) -> Self {
        let credentials = CredentialStore::load(&config.customers_file).await;
        let local = Arc::new(OllamaBackend::new(&config.ollama));
        let remote = Arc::new(HuggingFaceBackend::new(&config.huggingface));
        Self::new(config, credentials, local, remote)
    }

    pub fn backend(&self, mode: BackendMode) -> &dyn InferenceBackend {
        match mode {
            BackendMode::Local => self.local.as_ref(),
            BackendMode::Remote => self.remote.as_ref(),
        }
    }
}
