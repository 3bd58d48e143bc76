#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use printquote_core::roles::Party;
use printquote_core::types::Amount;
use printquote_db::models::design_request::DesignRequest;
use printquote_gateway::testing::{FakeAssetStore, FakePaymentProcessor};
use printquote_workflow::{
    Actor, AssetLinks, MessageThread, NegotiationController, NewDesignRequest, PaymentGate,
};
use sqlx::PgPool;

pub const CUSTOMER: Actor = Actor {
    user_id: 101,
    party: Party::Customer,
};

pub const OTHER_CUSTOMER: Actor = Actor {
    user_id: 202,
    party: Party::Customer,
};

pub const STAFF: Actor = Actor {
    user_id: 7,
    party: Party::Staff,
};

/// Every workflow service wired to one pool and the in-memory fakes.
pub struct Harness {
    pub controller: NegotiationController,
    pub thread: MessageThread,
    pub gate: PaymentGate,
    pub assets: AssetLinks,
    pub processor: Arc<FakePaymentProcessor>,
    pub store: Arc<FakeAssetStore>,
}

pub fn harness(pool: PgPool) -> Harness {
    let processor = Arc::new(FakePaymentProcessor::new());
    let store = Arc::new(FakeAssetStore::new());
    Harness {
        controller: NegotiationController::new(pool.clone()),
        thread: MessageThread::new(pool.clone()),
        gate: PaymentGate::new(pool.clone(), processor.clone()),
        assets: AssetLinks::new(pool, store.clone(), Duration::from_secs(900)),
        processor,
        store,
    }
}

pub fn new_request() -> NewDesignRequest {
    NewDesignRequest {
        asset_key: "uploads/101/banner.pdf".to_string(),
        asset_name: "banner.pdf".to_string(),
        quantity: 20,
        size: Some("3x6 ft".to_string()),
    }
}

/// A fresh request owned by [`CUSTOMER`].
pub async fn submitted(h: &Harness) -> DesignRequest {
    h.controller
        .submit_request(&CUSTOMER, new_request())
        .await
        .unwrap()
}

/// A request quoted at `amount` and accepted by the customer.
pub async fn locked_at(h: &Harness, amount: Amount) -> DesignRequest {
    let request = submitted(h).await;
    h.controller
        .submit_quote(request.id, &STAFF, amount, None)
        .await
        .unwrap();
    h.controller
        .accept_quote(request.id, &CUSTOMER)
        .await
        .unwrap()
}
