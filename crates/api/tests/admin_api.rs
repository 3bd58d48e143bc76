//! Staff view endpoints: queue, detail, notes, fulfilment and payments.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, customer_token, get, post, post_json, put_json, quote, staff_token, submit_request,
};
use serde_json::json;
use sqlx::PgPool;

fn admin_uri(id: i64, tail: &str) -> String {
    format!("/api/v1/admin/design-requests/{id}{tail}")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn queue_lists_all_customers_and_filters_by_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = submit_request(&app.router).await;
    submit_request(&app.router).await;
    quote(&app.router, first, 700).await;

    let token = staff_token();
    let response = get(&app.router, "/api/v1/admin/design-requests", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);

    let response = get(
        &app.router,
        "/api/v1/admin/design-requests?status=quotation_sent",
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["id"], first);
    assert_eq!(json["data"]["items"][0]["asset_key"], "uploads/101/flyer.pdf");

    let response = get(
        &app.router,
        "/api/v1/admin/design-requests?limit=1&offset=1",
        Some(&token),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["limit"], 1);
    assert_eq!(json["data"]["offset"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_ledger_and_unread_count(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_request(&app.router).await;
    quote(&app.router, id, 500).await;
    post_json(
        &app.router,
        &format!("/api/v1/customer/design-requests/{id}/messages"),
        Some(&customer_token()),
        json!({ "text": "Any discount for 500 copies?" }),
    )
    .await;

    let token = staff_token();
    let response = get(&app.router, &admin_uri(id, ""), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread_messages"], 1);
    assert_eq!(json["data"]["negotiations"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["available_actions"], json!(["lock_price", "reject"]));

    // Reading the thread clears the unread count.
    let response = get(&app.router, &admin_uri(id, "/messages"), Some(&token)).await;
    let messages = body_json(response).await;
    assert_eq!(messages["data"][0]["is_read"], true);

    let response = get(&app.router, &admin_uri(id, ""), Some(&token)).await;
    assert_eq!(body_json(response).await["data"]["unread_messages"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_are_staff_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_request(&app.router).await;

    let response = put_json(
        &app.router,
        &admin_uri(id, "/notes"),
        Some(&staff_token()),
        json!({ "admin_notes": "Customer prefers recycled paper" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["admin_notes"],
        "Customer prefers recycled paper"
    );

    let response = get(
        &app.router,
        &format!("/api/v1/customer/design-requests/{id}"),
        Some(&customer_token()),
    )
    .await;
    assert!(body_json(response).await["data"].get("admin_notes").is_none());

    let response = put_json(
        &app.router,
        &admin_uri(id, "/notes"),
        Some(&staff_token()),
        json!({ "admin_notes": null }),
    )
    .await;
    assert!(body_json(response).await["data"]["admin_notes"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_lock_then_fulfilment_after_payment(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = staff_token();
    let id = submit_request(&app.router).await;
    quote(&app.router, id, 1200).await;

    let response = post(&app.router, &admin_uri(id, "/lock"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "payment_pending");
    assert_eq!(json["data"]["final_amount"], 1200);

    // Fulfilment cannot start before payment.
    let response = post_json(
        &app.router,
        &admin_uri(id, "/advance"),
        Some(&token),
        json!({ "next_status": "in_progress" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");

    let response = post(
        &app.router,
        &format!("/api/v1/customer/design-requests/{id}/payments"),
        Some(&customer_token()),
    )
    .await;
    let order_id = body_json(response).await["data"]["external_order_id"]
        .as_str()
        .unwrap()
        .to_string();
    let callback = app.processor.sign(&order_id, "pay_777");
    let response = post_json(
        &app.router,
        "/api/v1/payments/webhook",
        None,
        json!({
            "external_order_id": callback.external_order_id,
            "external_payment_id": callback.external_payment_id,
            "signature": callback.signature,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    for next in ["in_progress", "completed"] {
        let response = post_json(
            &app.router,
            &admin_uri(id, "/advance"),
            Some(&token),
            json!({ "next_status": next }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["status"], next);
    }

    let response = get(&app.router, &admin_uri(id, "/payments"), Some(&token)).await;
    let json = body_json(response).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["external_payment_id"], "pay_777");
    assert_eq!(records[0]["amount"], 1200);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_is_terminal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = staff_token();
    let id = submit_request(&app.router).await;

    let response = post(&app.router, &admin_uri(id, "/reject"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["available_actions"], json!([]));

    let response = quote(&app.router, id, 100).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_role_is_treated_as_staff(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_request(&app.router).await;

    let admin = common::token(1, "admin");
    let response = get(&app.router, &admin_uri(id, ""), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
