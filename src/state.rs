use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Repositories;

/// Shared request state: configuration plus store handles.
///
/// Built once in `main` and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        Self {
            config: Arc::new(config),
            repos,
        }
    }
}
