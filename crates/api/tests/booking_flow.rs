//! Integration tests for the four-step booking flow, through to the ledger.

mod common;

use axum::http::StatusCode;
use common::{expect_status, get, post_empty, post_json};
use serde_json::json;
use sqlx::PgPool;

// 2025-09-01 is a Monday.
const MONDAY: &str = "2025-09-01";

/// Drive a session up to the payment step for the given slot.
async fn session_at_payment(app: &axum::Router, time: &str) -> String {
    let created = expect_status(post_empty(app, "/api/v1/sessions").await, StatusCode::CREATED).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let selected = expect_status(
        post_json(
            app,
            &format!("/api/v1/sessions/{id}/select"),
            json!({ "service_id": "cut", "staff_id": "ayoub" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(selected["data"]["step"], "slot_select");

    let slotted = expect_status(
        post_json(
            app,
            &format!("/api/v1/sessions/{id}/slot"),
            json!({ "date": MONDAY, "time": time }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(slotted["data"]["step"], "contact_info");

    let contacted = expect_status(
        post_json(
            app,
            &format!("/api/v1/sessions/{id}/contact"),
            json!({ "full_name": "Karim Diop", "phone": "+33612345678", "notes": "low fade" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(contacted["data"]["step"], "payment");

    id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn full_flow_confirms_and_appends_to_ledger(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let id = session_at_payment(&app, "10:30").await;

    let confirmed = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::OK,
    )
    .await;

    let data = &confirmed["data"];
    assert_eq!(data["session"]["paid"], true);
    assert_eq!(data["appointment"]["staff_id"], "ayoub");
    assert_eq!(data["appointment"]["start_min"], 630);
    assert_eq!(data["appointment"]["duration_min"], 30);

    // Both recap payloads are fully resolved.
    let client_msg = data["messages"]["client"].as_str().unwrap();
    assert!(client_msg.contains("Karim"));
    assert!(client_msg.contains("Haircut"));
    assert!(client_msg.contains("10:30"));
    let owner_msg = data["messages"]["owner"].as_str().unwrap();
    assert!(owner_msg.contains("+33612345678"));
    assert!(owner_msg.contains("low fade"));

    // Deep links point at the right numbers.
    assert!(data["links"]["client"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/33612345678?text="));
    assert!(data["links"]["owner"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/33600000000?text="));

    // The ledger holds exactly one row for the day.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE staff_id = 'ayoub'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booked_slot_disappears_from_availability(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = session_at_payment(&app, "10:30").await;
    expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::OK,
    )
    .await;

    let json = expect_status(
        get(
            app.clone(),
            &format!("/api/v1/availability?staff_id=ayoub&service_id=cut&date={MONDAY}"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let slots = json["data"]["slots"].as_array().unwrap();

    assert!(!slots.iter().any(|s| s == "10:30"));
    // Neighbouring non-overlapping starts survive.
    assert!(slots.iter().any(|s| s == "10:00"));
    assert!(slots.iter().any(|s| s == "11:00"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn losing_the_race_for_a_slot_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Both sessions pass slot selection while the ledger is still empty.
    let first = session_at_payment(&app, "15:00").await;
    let second = session_at_payment(&app, "15:00").await;

    expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{first}/confirm")).await,
        StatusCode::OK,
    )
    .await;

    let lost = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{second}/confirm")).await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(lost["code"], "SLOT_TAKEN");

    // The loser's session stays in the payment step, unpaid, so the client
    // can go back and re-select.
    let view = expect_status(
        get(app.clone(), &format!("/api/v1/sessions/{second}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(view["data"]["step"], "payment");
    assert_eq!(view["data"]["paid"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn double_confirmation_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = session_at_payment(&app, "16:00").await;

    expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::OK,
    )
    .await;
    let json = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn picking_an_unoffered_time_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = expect_status(post_empty(&app, "/api/v1/sessions").await, StatusCode::CREATED).await;
    let id = created["data"]["id"].as_str().unwrap();

    expect_status(
        post_json(
            &app,
            &format!("/api/v1/sessions/{id}/select"),
            json!({ "service_id": "cut", "staff_id": "ayoub" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    // 13:00 is blocked by the break buffer; never offered on this calendar.
    let json = expect_status(
        post_json(
            &app,
            &format!("/api/v1/sessions/{id}/slot"),
            json!({ "date": MONDAY, "time": "13:00" }),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(json["code"], "SLOT_TAKEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn steps_cannot_be_skipped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = expect_status(post_empty(&app, "/api/v1/sessions").await, StatusCode::CREATED).await;
    let id = created["data"]["id"].as_str().unwrap();

    // Straight to contact info without a slot.
    let json = expect_status(
        post_json(
            &app,
            &format!("/api/v1/sessions/{id}/contact"),
            json!({ "full_name": "Karim Diop", "phone": "+33612345678" }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Straight to confirmation from the first step.
    let json = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn contact_length_limits_are_enforced(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = {
        let created =
            expect_status(post_empty(&app, "/api/v1/sessions").await, StatusCode::CREATED).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        expect_status(
            post_json(
                &app,
                &format!("/api/v1/sessions/{id}/select"),
                json!({ "service_id": "cut", "staff_id": "ayoub" }),
            )
            .await,
            StatusCode::OK,
        )
        .await;
        expect_status(
            post_json(
                &app,
                &format!("/api/v1/sessions/{id}/slot"),
                json!({ "date": MONDAY, "time": "11:00" }),
            )
            .await,
            StatusCode::OK,
        )
        .await;
        id
    };

    let json = expect_status(
        post_json(
            &app,
            &format!("/api/v1/sessions/{id}/contact"),
            json!({ "full_name": "Karim Diop", "phone": "123" }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn changing_date_after_back_clears_the_slot(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = session_at_payment(&app, "17:00").await;

    // Payment -> contact info -> slot selection.
    post_empty(&app, &format!("/api/v1/sessions/{id}/back")).await;
    let view = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/back")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(view["data"]["step"], "slot_select");
    assert_eq!(view["data"]["time"], "17:00");

    // Re-slotting on a different date works end to end (the machine clears
    // the old slot internally when the date changes).
    let tuesday = "2025-09-02";
    let view = expect_status(
        post_json(
            &app,
            &format!("/api/v1/sessions/{id}/slot"),
            json!({ "date": tuesday, "time": "10:00" }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(view["data"]["date"], tuesday);
    assert_eq!(view["data"]["time"], "10:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_starts_a_new_booking(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = session_at_payment(&app, "18:00").await;
    expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/confirm")).await,
        StatusCode::OK,
    )
    .await;

    let view = expect_status(
        post_empty(&app, &format!("/api/v1/sessions/{id}/reset")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(view["data"]["step"], "service_select");
    assert_eq!(view["data"]["service_id"], "cut");
    assert_eq!(view["data"]["paid"], false);
    assert!(view["data"]["date"].is_null());

    let json = expect_status(
        get(app.clone(), &format!("/api/v1/sessions/{id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["step"], "service_select");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_session_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
