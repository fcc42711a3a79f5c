mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use common::{bearer, init_app, seed_user, state_with_db};
use serde_json::{json, Value};

fn rex() -> Value {
    json!({
        "name": "Rex",
        "animalType": "dog",
        "gender": "male",
        "breed": ["labrador"],
        "color": ["black", "white"],
        "age": "3",
        "dateLost": "2025-03-01",
        "location": "123 Main St",
        "postalCode": "V5K 0A1",
        "locationCoords": { "lat": 49.2827, "lng": -123.1207 },
        "description": "Friendly, answers to Rex",
        "petId": "chip-0042"
    })
}

macro_rules! call {
    ($app:expr, $req:expr) => {
        test::call_service(&$app, $req.to_request()).await
    };
}

#[actix_web::test]
async fn create_then_read_back_with_location() {
    let state = state_with_db().await;
    let owner = seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("owner@example.com")))
            .set_json(rex())
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Lost pet listing created successfully");
    assert_eq!(created["user_uuid"], owner.to_string());
    let id = created["id"].as_i64().unwrap();

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("someone@example.com")))
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["pet_name"], "Rex");
    assert_eq!(data["listing_owner"], owner.to_string());
    assert_eq!(data["color"], json!(["black", "white"]));
    assert_eq!(data["is_found"], false);
    assert_eq!(data["date_lost"], "2025-03-01T00:00:00Z");
    assert_eq!(data["location"]["street_address"], "123 Main St");
    assert_eq!(data["location"]["latitude"], 49.2827);
}

#[actix_web::test]
async fn create_without_required_fields_is_validation_error() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("owner@example.com")))
            .set_json(json!({ "name": "Rex", "animalType": "dog" }))
    );

    let problem = assert_problem_details(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST).await;
    assert!(problem.detail.contains("color"));
    assert!(problem.detail.contains("dateLost"));
}

#[actix_web::test]
async fn create_with_bad_date_is_rejected() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;

    let mut body = rex();
    body["dateLost"] = json!("last tuesday");
    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("owner@example.com")))
            .set_json(body)
    );

    assert_problem_details(resp, "INVALID_DATE", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn create_for_unknown_user_is_not_found() {
    let app = init_app(state_with_db().await).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("ghost@example.com")))
            .set_json(rex())
    );

    assert_problem_details(resp, "USER_NOT_FOUND", StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn non_owner_update_is_forbidden_and_changes_nothing() {
    let state = state_with_db().await;
    seed_user(&state, "u1@example.com").await;
    seed_user(&state, "u2@example.com").await;
    let app = init_app(state).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("u1@example.com")))
            .set_json(rex())
    );
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    let resp = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("u2@example.com")))
            .set_json(json!({ "name": "Stolen", "isFound": true }))
    );
    assert_problem_details(resp, "FORBIDDEN", StatusCode::FORBIDDEN).await;

    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("u2@example.com")))
    );
    assert_problem_details(resp, "FORBIDDEN", StatusCode::FORBIDDEN).await;

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("u1@example.com")))
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pet_name"], "Rex");
    assert_eq!(body["data"]["is_found"], false);
    assert!(body["data"].get("date_found").is_none());
}

#[actix_web::test]
async fn owner_update_and_delete() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;
    let auth = bearer("owner@example.com");

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", auth.clone()))
            .set_json(rex())
    );
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    let resp = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({
                "isFound": true,
                "location": "500 Granville St",
                "locationCoords": { "lat": 49.2840, "lng": -123.1160 },
                "imageUrls": ["https://lostpets-test-images.s3.amazonaws.com/uploads/rex.jpg"]
            }))
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Lost pet listing updated successfully");
    assert_eq!(body["id"], id);

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", auth.clone()))
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_found"], true);
    assert!(body["data"]["date_found"].is_string());
    assert_eq!(body["data"]["location"]["street_address"], "500 Granville St");
    assert_eq!(body["data"]["image_urls"].as_array().unwrap().len(), 1);

    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", auth.clone()))
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", auth))
    );
    assert_problem_details(resp, "LISTING_NOT_FOUND", StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn empty_update_is_rejected_for_owner_only() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    seed_user(&state, "other@example.com").await;
    let app = init_app(state).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("owner@example.com")))
            .set_json(rex())
    );
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    // Ownership is decided before the body is inspected.
    let resp = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("other@example.com")))
            .set_json(json!({}))
    );
    assert_problem_details(resp, "FORBIDDEN", StatusCode::FORBIDDEN).await;

    let resp = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/lost-listing/{id}"))
            .insert_header(("Authorization", bearer("owner@example.com")))
            .set_json(json!({ "name": "  " }))
    );
    assert_problem_details(resp, "NO_FIELDS_TO_UPDATE", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn bad_and_unknown_ids() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;

    for raw in ["abc", "0", "-4"] {
        let resp = call!(
            app,
            test::TestRequest::get()
                .uri(&format!("/api/lost-listing/{raw}"))
                .insert_header(("Authorization", bearer("owner@example.com")))
        );
        assert_problem_details(resp, "INVALID_LISTING_ID", StatusCode::BAD_REQUEST).await;
    }

    let resp = call!(
        app,
        test::TestRequest::delete()
            .uri("/api/lost-listing/9999")
            .insert_header(("Authorization", bearer("owner@example.com")))
    );
    assert_problem_details(resp, "LISTING_NOT_FOUND", StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn list_filters_and_pages_newest_first() {
    let state = state_with_db().await;
    seed_user(&state, "a@example.com").await;
    seed_user(&state, "b@example.com").await;
    let app = init_app(state).await;

    for (email, name, animal) in [
        ("a@example.com", "Rex", "dog"),
        ("a@example.com", "Tom", "cat"),
        ("b@example.com", "Fido", "dog"),
    ] {
        let mut body = rex();
        body["name"] = json!(name);
        body["animalType"] = json!(animal);
        let resp = call!(
            app,
            test::TestRequest::post()
                .uri("/api/lost-listing")
                .insert_header(("Authorization", bearer(email)))
                .set_json(body)
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let list = |query: &str| {
        test::TestRequest::get()
            .uri(&format!("/api/lost-listing{query}"))
            .insert_header(("Authorization", bearer("a@example.com")))
    };

    let resp = call!(app, list(""));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["limit"], 50);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["data"][0]["pet_name"], "Fido");

    let resp = call!(app, list("?animalType=dog"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);

    let resp = call!(app, list("?mine=true"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);

    let resp = call!(app, list("?limit=1&offset=1"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["pet_name"], "Tom");

    // Out-of-range paging falls back to defaults.
    let resp = call!(app, list("?limit=500&offset=-3&isFound=maybe"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["limit"], 50);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["count"], 3);

    let resp = call!(app, list("?offset=18446744073709551615"));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["offset"], 0);
    assert_eq!(body["count"], 3);

    let resp = call!(app, list("?offset=9223372036854775807"));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["offset"], 9223372036854775807_u64);
    assert_eq!(body["count"], 0);

    let resp = call!(app, list("?isFound=true"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn malformed_json_body_is_problem_details() {
    let state = state_with_db().await;
    seed_user(&state, "owner@example.com").await;
    let app = init_app(state).await;

    let resp = call!(
        app,
        test::TestRequest::post()
            .uri("/api/lost-listing")
            .insert_header(("Authorization", bearer("owner@example.com")))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
    );

    assert_problem_details(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST).await;
}
