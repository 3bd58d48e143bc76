//! Signed download links for a request's uploaded design file.

use std::sync::Arc;
use std::time::Duration;

use printquote_core::types::DbId;
use printquote_core::workflow::WorkflowError;
use printquote_db::DbPool;
use printquote_gateway::AssetStore;

use crate::actor::{load_request, Actor};
use crate::error::ServiceError;

#[derive(Clone)]
pub struct AssetLinks {
    pool: DbPool,
    store: Arc<dyn AssetStore>,
    ttl: Duration,
}

impl AssetLinks {
    pub fn new(pool: DbPool, store: Arc<dyn AssetStore>, ttl: Duration) -> Self {
        Self { pool, store, ttl }
    }

    /// A time-limited URL for the request's asset.
    pub async fn asset_url(&self, id: DbId, actor: &Actor) -> Result<String, ServiceError> {
        let request = load_request(&self.pool, id, actor, "view_asset").await?;
        self.store
            .signed_url(&request.asset_key, self.ttl)
            .await
            .map_err(|e| {
                tracing::warn!(design_request_id = id, error = %e, "Asset URL signing failed");
                ServiceError::from(WorkflowError::UpstreamUnavailable(
                    "Unable to retrieve file".into(),
                ))
            })
    }
}
