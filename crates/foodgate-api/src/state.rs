//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foodgate_auth::{
    AuthenticationGate, CredentialVerifier, HierarchyIndex, TokenLifecycleManager, UserLookup,
};
use foodgate_core::AppResult;
use foodgate_core::config::AppConfig;

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks and are
/// immutable once built.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance and classification
    pub lifecycle: Arc<TokenLifecycleManager>,
    /// Role hierarchy closure
    pub hierarchy: Arc<HierarchyIndex>,
    /// User directory
    pub users: Arc<dyn UserLookup>,
    /// Username/password verifier
    pub credentials: Arc<dyn CredentialVerifier>,
    /// Per-request authentication gate
    pub gate: Arc<AuthenticationGate>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("lifecycle", &self.lifecycle)
            .field("hierarchy_roles", &self.hierarchy.len())
            .field("gate", &self.gate)
            .finish()
    }
}

impl AppState {
    /// Builds the state, failing fast on an unusable key or hierarchy.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserLookup>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> AppResult<Self> {
        let lifecycle = Arc::new(TokenLifecycleManager::new(&config.auth)?);
        let hierarchy = Arc::new(HierarchyIndex::from_config(&config.hierarchy)?);
        let gate = Arc::new(AuthenticationGate::new(
            Arc::clone(&lifecycle),
            Arc::clone(&users),
            Arc::clone(&hierarchy),
            &config.auth,
        ));

        Ok(Self {
            config: Arc::new(config),
            lifecycle,
            hierarchy,
            users,
            credentials,
            gate,
        })
    }
}
