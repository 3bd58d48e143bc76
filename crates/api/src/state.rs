use std::sync::Arc;
use std::time::Duration;

use printquote_gateway::{AssetStore, PaymentProcessor};
use printquote_workflow::{AssetLinks, MessageThread, NegotiationController, PaymentGate};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and services are handles over shared data.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: printquote_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub controller: NegotiationController,
    pub thread: MessageThread,
    pub payments: PaymentGate,
    pub assets: AssetLinks,
}

impl AppState {
    /// Wire the workflow services to one pool and the external collaborators.
    pub fn new(
        pool: printquote_db::DbPool,
        config: ServerConfig,
        processor: Arc<dyn PaymentProcessor>,
        store: Arc<dyn AssetStore>,
    ) -> Self {
        let ttl = Duration::from_secs(config.asset_url_ttl_secs);
        Self {
            controller: NegotiationController::new(pool.clone()),
            thread: MessageThread::new(pool.clone()),
            payments: PaymentGate::new(pool.clone(), processor),
            assets: AssetLinks::new(pool.clone(), store, ttl),
            pool,
            config: Arc::new(config),
        }
    }
}
