//! Integration tests for the design request schema and repositories.
//!
//! Exercises the guarded writes against a real database:
//! - lookup tables seeded to match the core status enums
//! - check constraints and triggers backing the price-lock invariants
//! - conditional transition writes and ledger atomicity
//! - message thread read flags and ordering

use printquote_core::roles::Party;
use printquote_core::status::{PaymentStatus, RequestStatus};
use printquote_core::workflow::{plan, Command, PriceState};
use printquote_db::models::design_request::{CreateDesignRequest, DesignRequestFilter};
use printquote_db::models::message::CreateMessage;
use printquote_db::repositories::{DesignRequestRepo, MessageRepo, NegotiationRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CUSTOMER_ID: i64 = 101;
const STAFF_ID: i64 = 7;

fn new_request(customer_id: i64) -> CreateDesignRequest {
    CreateDesignRequest {
        customer_id,
        asset_key: "uploads/101/poster.pdf".to_string(),
        asset_name: "poster.pdf".to_string(),
        quantity: 50,
        size: Some("A2".to_string()),
    }
}

fn message(request_id: i64, party: Party, sender_id: i64, body: &str) -> CreateMessage {
    CreateMessage {
        design_request_id: request_id,
        sender_role: party.as_str().to_string(),
        sender_id,
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_tables_match_core_enums(pool: PgPool) {
    printquote_db::health_check(&pool).await.unwrap();

    for status in RequestStatus::ALL {
        let row: (String,) = sqlx::query_as("SELECT name FROM design_request_statuses WHERE id = $1")
            .bind(status.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, status.name());
    }
    for status in PaymentStatus::ALL {
        let row: (String,) = sqlx::query_as("SELECT name FROM payment_statuses WHERE id = $1")
            .bind(status.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, status.name());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_request_starts_pending_review(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    assert_eq!(request.status().unwrap(), RequestStatus::PendingReview);
    assert_eq!(request.quoted_amount, None);
    assert_eq!(request.final_amount, None);
    assert!(!request.price_locked);
}

// ---------------------------------------------------------------------------
// Invariant guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_without_final_amount_is_refused(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();

    let result = sqlx::query(
        "UPDATE design_requests SET price_locked = true, status_id = 5 WHERE id = $1",
    )
    .bind(request.id)
    .execute(&pool)
    .await;
    assert!(result.is_err(), "price_locked without final_amount must violate a check");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_at_other_than_quote_is_refused(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();

    let result = sqlx::query(
        "UPDATE design_requests
         SET status_id = 5, quoted_amount = 600, final_amount = 450, price_locked = true
         WHERE id = $1",
    )
    .bind(request.id)
    .execute(&pool)
    .await;
    assert!(result.is_err(), "final_amount must equal the quote in force");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locked_price_is_frozen_by_trigger(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    sqlx::query(
        "UPDATE design_requests
         SET status_id = 5, quoted_amount = 450, final_amount = 450, price_locked = true
         WHERE id = $1",
    )
    .bind(request.id)
    .execute(&pool)
    .await
    .unwrap();

    let result = sqlx::query("UPDATE design_requests SET final_amount = 600 WHERE id = $1")
        .bind(request.id)
        .execute(&pool)
        .await;
    assert!(result.is_err(), "changing a locked final_amount must fail");

    let result = sqlx::query("UPDATE design_requests SET quoted_amount = 600 WHERE id = $1")
        .bind(request.id)
        .execute(&pool)
        .await;
    assert!(result.is_err(), "changing a locked quoted_amount must fail");

    let reloaded = DesignRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.final_amount, Some(450));
    assert_eq!(reloaded.quoted_amount, Some(450));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_notes_update_on_locked_request(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    sqlx::query(
        "UPDATE design_requests
         SET status_id = 5, quoted_amount = 450, final_amount = 450, price_locked = true
         WHERE id = $1",
    )
    .bind(request.id)
    .execute(&pool)
    .await
    .unwrap();

    let updated = DesignRequestRepo::update_admin_notes(&pool, request.id, Some("rush order"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.admin_notes.as_deref(), Some("rush order"));
    assert_eq!(updated.final_amount, Some(450));
}

// ---------------------------------------------------------------------------
// Conditional transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_transition_writes_status_and_ledger(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    let snapshot = request.price_state().unwrap();
    let transition = plan(&snapshot, Party::Staff, &Command::SubmitQuote { amount: 500 }).unwrap();

    let updated = DesignRequestRepo::apply_transition(
        &pool,
        request.id,
        STAFF_ID,
        &transition,
        &snapshot,
        Some("includes lamination"),
    )
    .await
    .unwrap()
    .expect("guard should match");
    assert_eq!(updated.status().unwrap(), RequestStatus::QuotationSent);
    assert_eq!(updated.quoted_amount, Some(500));

    let ledger = NegotiationRepo::list_for_request(&pool, request.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].sender_role, "staff");
    assert_eq!(ledger[0].sender_id, STAFF_ID);
    assert_eq!(ledger[0].amount, 500);
    assert_eq!(ledger[0].note.as_deref(), Some("includes lamination"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_transition_writes_nothing(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    let snapshot = request.price_state().unwrap();
    let first = plan(&snapshot, Party::Staff, &Command::SubmitQuote { amount: 500 }).unwrap();
    let second = plan(&snapshot, Party::Staff, &Command::SubmitQuote { amount: 900 }).unwrap();

    DesignRequestRepo::apply_transition(&pool, request.id, STAFF_ID, &first, &snapshot, None)
        .await
        .unwrap()
        .expect("first write wins");
    let stale =
        DesignRequestRepo::apply_transition(&pool, request.id, STAFF_ID, &second, &snapshot, None)
            .await
            .unwrap();
    assert!(stale.is_none(), "planned against a stale status");

    let reloaded = DesignRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.quoted_amount, Some(500));
    let ledger = NegotiationRepo::list_for_request(&pool, request.id)
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1, "the losing write must not append to the ledger");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ledger_rows_cannot_be_edited(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    let transition = plan(
        &PriceState::initial(),
        Party::Staff,
        &Command::SubmitQuote { amount: 500 },
    )
    .unwrap();
    DesignRequestRepo::apply_transition(
        &pool,
        request.id,
        STAFF_ID,
        &transition,
        &PriceState::initial(),
        None,
    )
        .await
        .unwrap();

    let update = sqlx::query("UPDATE negotiation_entries SET amount = 1 WHERE design_request_id = $1")
        .bind(request.id)
        .execute(&pool)
        .await;
    assert!(update.is_err());
    let delete = sqlx::query("DELETE FROM negotiation_entries WHERE design_request_id = $1")
        .bind(request.id)
        .execute(&pool)
        .await;
    assert!(delete.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_customer_and_status(pool: PgPool) {
    let mine = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID + 1))
        .await
        .unwrap();

    let filter = DesignRequestFilter {
        customer_id: Some(CUSTOMER_ID),
        status_id: None,
        limit: 25,
        offset: 0,
    };
    let listed = DesignRequestRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine.id);

    let filter = DesignRequestFilter {
        customer_id: None,
        status_id: Some(RequestStatus::Paid.id()),
        limit: 25,
        offset: 0,
    };
    assert!(DesignRequestRepo::list(&pool, &filter).await.unwrap().is_empty());
    assert_eq!(
        DesignRequestRepo::count(&pool, None, Some(RequestStatus::PendingReview.id()))
            .await
            .unwrap(),
        2
    );
}

// ---------------------------------------------------------------------------
// Message thread
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_only_flips_other_party(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    MessageRepo::create(&pool, &message(request.id, Party::Customer, CUSTOMER_ID, "hi"))
        .await
        .unwrap();
    MessageRepo::create(&pool, &message(request.id, Party::Staff, STAFF_ID, "hello"))
        .await
        .unwrap();
    MessageRepo::create(&pool, &message(request.id, Party::Staff, STAFF_ID, "quote soon"))
        .await
        .unwrap();

    assert_eq!(
        MessageRepo::unread_count(&pool, request.id, "customer").await.unwrap(),
        2
    );
    let flipped = MessageRepo::mark_read(&pool, request.id, "customer")
        .await
        .unwrap();
    assert_eq!(flipped, 2);
    let again = MessageRepo::mark_read(&pool, request.id, "customer")
        .await
        .unwrap();
    assert_eq!(again, 0, "mark_read is idempotent");

    let thread = MessageRepo::list_for_request(&pool, request.id).await.unwrap();
    assert!(!thread[0].is_read, "customer's own message stays unread for staff");
    assert!(thread[1].is_read && thread[1].read_at.is_some());
    assert_eq!(
        MessageRepo::unread_count(&pool, request.id, "staff").await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_thread_is_returned_in_creation_order(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    for i in 0..5 {
        let party = if i % 2 == 0 { Party::Customer } else { Party::Staff };
        MessageRepo::create(&pool, &message(request.id, party, 1, &format!("m{i}")))
            .await
            .unwrap();
    }

    let thread = MessageRepo::list_for_request(&pool, request.id).await.unwrap();
    let bodies: Vec<_> = thread.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, ["m0", "m1", "m2", "m3", "m4"]);
    assert!(thread.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_message_body_is_refused(pool: PgPool) {
    let request = DesignRequestRepo::create(&pool, &new_request(CUSTOMER_ID))
        .await
        .unwrap();
    let result = MessageRepo::create(&pool, &message(request.id, Party::Staff, STAFF_ID, "   ")).await;
    assert!(result.is_err());
}
